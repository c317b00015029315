//! Registry reading.

use std::{io::Read, path::Path};

use crate::{ColumnSchema, Error, Result};

/// One data row of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: u64,
    fields: Vec<String>,
}

impl RawRow {
    /// Create a row from its fields and the 1-based line it started on.
    pub fn new(line: u64, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The 1-based line of the source the row started on.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Field at `index`, or `""` when the row is shorter.
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or_default()
    }

}

/// Parsed registry: every row after the header, in file order.
#[derive(Debug, Clone)]
pub struct Registry {
    source_name: String,
    rows: Vec<RawRow>,
}

impl Registry {
    /// Open and parse a registry file.
    pub fn open(path: impl AsRef<Path>, columns: &ColumnSchema) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_reader(file, &path.display().to_string(), columns)
    }

    /// Parse a registry held in memory.
    pub fn parse(content: &str, source_name: &str, columns: &ColumnSchema) -> Result<Self> {
        Self::from_reader(content.as_bytes(), source_name, columns)
    }

    /// Parse a registry from any reader.
    ///
    /// The first record is always the header and is dropped whatever it
    /// contains. Every record must have the header's field count and at
    /// least as many fields as `columns` references. Quotes are only
    /// accepted around a whole field, with `""` inside for a literal quote.
    pub fn from_reader(
        mut reader: impl Read,
        source_name: &str,
        columns: &ColumnSchema,
    ) -> Result<Self> {
        let csv_error = |source: csv::Error| {
            Box::new(Error::Csv {
                source_name: source_name.to_string(),
                source,
            })
        };

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| csv_error(e.into()))?;

        check_quoting(&content).map_err(|(line, message)| {
            Box::new(Error::Quoting {
                source_name: source_name.to_string(),
                line,
                message,
            })
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(content.as_slice());

        let required = columns.required_fields();
        let mut rows = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 1);

            if record.len() < required {
                return Err(Box::new(Error::RowTooShort {
                    source_name: source_name.to_string(),
                    line,
                    found: record.len(),
                    required,
                }));
            }

            if index == 0 {
                continue;
            }

            rows.push(RawRow::new(line, record.iter()));
        }

        tracing::debug!(source = source_name, rows = rows.len(), "read registry");

        Ok(Self {
            source_name: source_name.to_string(),
            rows,
        })
    }

    /// Name of the source used in diagnostics.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote inside a quoted field: either an escape or the closing quote
    QuoteInQuoted,
    /// Closing quote followed by `\r`, which must start a `\r\n`
    ClosedCr,
}

/// Reject quoting the csv reader would otherwise take as data.
///
/// Returns the 1-based line of the offending byte and what is wrong with it.
fn check_quoting(content: &[u8]) -> std::result::Result<(), (u64, &'static str)> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut opened_on = 1;

    for &byte in content {
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                opened_on = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b',' | b'\n') => {
                QuoteState::FieldStart
            }
            (QuoteState::Unquoted, b'"') => {
                return Err((line, "bare \" in non-quoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',' | b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, b'\r') => QuoteState::ClosedCr,
            (QuoteState::ClosedCr, b'\n') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted | QuoteState::ClosedCr, _) => {
                return Err((line, "extraneous \" in quoted field"));
            }
        };

        if byte == b'\n' {
            line += 1;
        }
    }

    match state {
        QuoteState::Quoted => Err((opened_on, "quoted field is never closed")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow_columns() -> ColumnSchema {
        ColumnSchema {
            exclude: 0,
            skip_generate: 1,
            package_v1: 2,
            package_v2: 3,
            display_name: 4,
            sdk_version: 5,
            provider_package_actual: 6,
            provider_package_correct: 7,
        }
    }

    #[test]
    fn test_header_is_skipped() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,y,Zebra,2,p,q\n";
        let registry = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rows()[0].get(4), "Zebra");
        assert_eq!(registry.rows()[0].line(), 2);
    }

    #[test]
    fn test_header_skipped_even_when_it_looks_like_data() {
        let csv = ",,x,y,Alpha,1,p,q\n,,x,y,Beta,1,p,q\n";
        let registry = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rows()[0].get(4), "Beta");
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "a,b,c,d,e,f,g,h\n,,\"x,1\",\"say \"\"hi\"\"\",Name,2,,\n";
        let registry = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap();

        let row = &registry.rows()[0];
        assert_eq!(row.get(2), "x,1");
        assert_eq!(row.get(3), "say \"hi\"");
        assert_eq!(row.get(7), "");
    }

    #[test]
    fn test_empty_input() {
        let registry = Registry::parse("", "test.csv", &narrow_columns()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unequal_row_length_is_malformed() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,y,Zebra,2,p,q,extra\n";
        let err = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap_err();

        assert!(matches!(*err, Error::Csv { .. }));
    }

    #[test]
    fn test_row_shorter_than_schema() {
        let csv = "a,b,c\n1,2,3\n";
        let err = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap_err();

        match *err {
            Error::RowTooShort {
                line,
                found,
                required,
                ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(found, 3);
                assert_eq!(required, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn quoting_error(csv: &str) -> (u64, &'static str) {
        match *Registry::parse(csv, "test.csv", &narrow_columns()).unwrap_err() {
            Error::Quoting { line, message, .. } => (line, message),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bare_quote_is_malformed() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,y\"z,Zebra,2,p,q\n";
        assert_eq!(quoting_error(csv), (2, "bare \" in non-quoted field"));
    }

    #[test]
    fn test_text_after_closing_quote_is_malformed() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,\"y\"z,Zebra,2,p,q\n";
        assert_eq!(quoting_error(csv), (2, "extraneous \" in quoted field"));
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,y,Zebra,2,p,\"q\n";
        assert_eq!(quoting_error(csv), (2, "quoted field is never closed"));
    }

    #[test]
    fn test_quoting_error_reports_its_line() {
        let csv = "a,b,c,d,e,f,g,h\n,,x,y,Zebra,2,p,q\n,,\"multi\nline\",y,Z,2,p,q\n,,x,y\"z,Zebra,2,p,q\n";
        assert_eq!(quoting_error(csv).0, 5);
    }

    #[test]
    fn test_crlf_after_quoted_field() {
        let csv = "a,b,c,d,e,f,g,h\r\n,,x,y,Zebra,2,p,\"q\"\r\n";
        let registry = Registry::parse(csv, "test.csv", &narrow_columns()).unwrap();
        assert_eq!(registry.rows()[0].get(7), "q");
    }

    #[test]
    fn test_missing_file() {
        let err = Registry::open("does/not/exist.csv", &narrow_columns()).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_raw_row_get_out_of_range() {
        let row = RawRow::new(1, ["a"]);
        assert_eq!(row.get(0), "a");
        assert_eq!(row.get(5), "");
    }
}
