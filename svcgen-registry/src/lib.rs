// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Service registry input for svcgen.
//!
//! The registry is a comma-delimited table with one header row. Rows are
//! addressed positionally through a [`ColumnSchema`], which together with the
//! input and output paths is loaded from an optional `svcgen.toml`.

mod columns;
mod config;
mod error;
mod reader;

pub use columns::ColumnSchema;
pub use config::{
    Config, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_REGISTRY_PATH, DEFAULT_SENTINEL,
    FilterConfig, OutputConfig, RegistryConfig,
};
pub use error::{Error, Result, SourceContext};
pub use reader::{RawRow, Registry};
