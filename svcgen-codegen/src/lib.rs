//! Generation pipeline for svcgen.
//!
//! Turns registry rows into a formatted source file:
//! normalize → sort → render → format, then write.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phase orchestration, diagnostics and plugin hooks
//! - [`render`] - Template binding ([`Renderer`], [`RenderContext`])
//! - [`format`] - Source canonicalization ([`SourceFormatter`], [`RustFormatter`])
//! - [`generator`] - Drives a pipeline run to a written file or a preview

mod error;
mod record;

pub mod format;
pub mod generator;
pub mod pipeline;
pub mod render;

pub use error::Error;
pub use format::{RustFormatter, SourceFormatter};
pub use generator::{GenerateResult, Generator};
pub use pipeline::{CompilationContext, Diagnostic, Pipeline, Severity};
pub use record::Record;
pub use render::{CLIENT_CONFIG_TEMPLATE, RenderContext, Renderer};
