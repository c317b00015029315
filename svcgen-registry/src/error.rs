use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for registry operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelled at the first occurrence of `needle` if present.
    pub fn validation_error_near(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        let span = self
            .src
            .find(needle)
            .map(|offset| SourceSpan::from((offset, needle.len())));
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(svcgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed registry '{source_name}'")]
    #[diagnostic(
        code(svcgen::malformed_registry),
        help("every row must have the same number of comma-separated fields as the header")
    )]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed registry '{source_name}': {message} on line {line}")]
    #[diagnostic(
        code(svcgen::bad_quoting),
        help("quote the whole field and write a literal quote as \"\"")
    )]
    Quoting {
        source_name: String,
        line: u64,
        message: &'static str,
    },

    #[error(
        "row on line {line} of '{source_name}' has {found} fields, the column schema needs {required}"
    )]
    #[diagnostic(
        code(svcgen::short_row),
        help("check the [columns] indices in svcgen.toml against the registry header")
    )]
    RowTooShort {
        source_name: String,
        line: u64,
        found: usize,
        required: usize,
    },

    #[error("failed to parse svcgen.toml")]
    #[diagnostic(code(svcgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(svcgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
