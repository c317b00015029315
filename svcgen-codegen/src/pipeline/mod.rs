//! Generation pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the generation
//! phases over registry rows. The pipeline provides:
//!
//! - Explicit phase boundaries (normalize → sort → render → format)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```ignore
//! use svcgen_codegen::{Pipeline, Renderer};
//!
//! let pipeline = Pipeline::new().renderer(Renderer::client_config()?);
//! let ctx = pipeline.run(registry)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//!
//! let generator = Generator::from_context(ctx)?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::{Plugin, TracingPlugin};
pub use runner::Pipeline;
