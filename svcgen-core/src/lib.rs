//! Core utilities and types for the svcgen source generator.
//!
//! This crate provides the pieces shared by every stage of generation:
//! identifier casing and output file persistence.

mod file;
mod naming;

// File operations
pub use file::{File, WriteMode, WriteResult};
// String utilities
pub use naming::to_camel_case;
