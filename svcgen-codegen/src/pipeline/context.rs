//! Compilation context passed through pipeline phases.

use svcgen_registry::{ColumnSchema, FilterConfig, RawRow};

use super::diagnostic::Diagnostic;
use crate::Record;

/// Context passed through all pipeline phases.
///
/// This struct carries the state of generation through each phase,
/// accumulating results and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// Column layout the rows are read with.
    pub columns: ColumnSchema,
    /// Record selection settings.
    pub filter: FilterConfig,
    /// Registry data rows, header excluded.
    pub rows: Vec<RawRow>,
    /// Accepted records (populated by NormalizePhase, ordered by SortPhase).
    pub records: Option<Vec<Record>>,
    /// Raw template output (populated by RenderPhase).
    pub rendered: Option<String>,
    /// Canonicalized source (populated by FormatPhase).
    pub formatted: Option<String>,
    /// Diagnostics collected during generation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context from registry rows.
    pub fn new(rows: Vec<RawRow>, columns: ColumnSchema, filter: FilterConfig) -> Self {
        Self {
            columns,
            filter,
            rows,
            records: None,
            rendered: None,
            formatted: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
    }

    /// Accepted records so far, empty before NormalizePhase runs.
    pub fn records(&self) -> &[Record] {
        self.records.as_deref().unwrap_or_default()
    }
}
