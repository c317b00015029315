//! Canonicalization of rendered source.

use crate::Error;

/// Canonicalizes rendered text before it is persisted.
///
/// Implementations must reject text that is not valid source for their
/// language rather than pass it through.
pub trait SourceFormatter: Send + Sync {
    /// Language identifier (e.g., "rust")
    fn language(&self) -> &'static str;

    /// Parse `source` and print it back in canonical form.
    fn format(&self, source: &str) -> Result<String, Error>;
}

/// Formats Rust source by parsing it with `syn` and printing it with `prettyplease`.
///
/// Plain `//` comments do not survive; use doc comments in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFormatter;

impl SourceFormatter for RustFormatter {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn format(&self, source: &str) -> Result<String, Error> {
        let file = syn::parse_file(source).map_err(|e| Error::Format(Box::new(e)))?;
        Ok(prettyplease::unparse(&file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_whitespace() {
        let formatted = RustFormatter
            .format("pub   const  A : &str =\n\n \"x\" ;")
            .unwrap();
        insta::assert_snapshot!(formatted, @r#"pub const A: &str = "x";"#);
    }

    #[test]
    fn test_reindents() {
        let formatted = RustFormatter
            .format("fn f() -> u8 {\n1\n}")
            .unwrap();
        assert_eq!(formatted, "fn f() -> u8 {\n    1\n}\n");
    }

    #[test]
    fn test_is_idempotent() {
        let once = RustFormatter
            .format("/// Doc.\npub enum E { A, B }\nimpl E { pub const fn n(self) -> u8 { match self { E::A => 1, E::B => 2 } } }")
            .unwrap();
        let twice = RustFormatter.format(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_source_is_format_error() {
        let err = RustFormatter.format("pub enum {").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
