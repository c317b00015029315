//! Turns a finished pipeline run into a written file or a preview.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use svcgen_core::{File, WriteMode, WriteResult};

use crate::{Diagnostic, Record, pipeline::CompilationContext};

/// Result of code generation
#[derive(Debug)]
pub struct GenerateResult {
    /// Path that was written
    pub path: PathBuf,
    /// How the file was written
    pub write: WriteResult,
    /// Number of generated services
    pub services: usize,
    /// Bytes written in this run
    pub bytes: usize,
}

/// Holds the formatted output of a pipeline run.
#[derive(Debug)]
pub struct Generator {
    records: Vec<Record>,
    source: String,
    diagnostics: Vec<Diagnostic>,
}

impl Generator {
    /// Create a generator from a pipeline context.
    ///
    /// # Errors
    ///
    /// Returns an error if the context has no formatted source, i.e. the
    /// format phase has not run.
    pub fn from_context(mut ctx: CompilationContext) -> Result<Self> {
        let source = ctx
            .formatted
            .take()
            .ok_or_else(|| eyre!("formatted source not set - did FormatPhase run?"))?;

        Ok(Self {
            records: ctx.records.take().unwrap_or_default(),
            source,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Generated services in output order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Diagnostics collected by the pipeline.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Formatted source, exactly as it would be written.
    pub fn preview(&self) -> &str {
        &self.source
    }

    /// Write the formatted source to `path`.
    pub fn generate(&self, path: &Path, mode: WriteMode) -> Result<GenerateResult> {
        let write = File::new(path, self.source.as_str()).mode(mode).write()?;

        Ok(GenerateResult {
            path: path.to_path_buf(),
            write,
            services: self.records.len(),
            bytes: self.source.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use svcgen_registry::{ColumnSchema, FilterConfig};

    use super::*;

    #[test]
    fn test_from_context_requires_formatted_source() {
        let ctx =
            CompilationContext::new(Vec::new(), ColumnSchema::default(), FilterConfig::default());
        assert!(Generator::from_context(ctx).is_err());
    }

    #[test]
    fn test_generate_writes_source() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("out.rs");

        let mut ctx =
            CompilationContext::new(Vec::new(), ColumnSchema::default(), FilterConfig::default());
        ctx.records = Some(vec![Record::new("Svc", "2", "svc")]);
        ctx.formatted = Some("pub struct Svc;\n".to_string());

        let generator = Generator::from_context(ctx).unwrap();
        let result = generator.generate(&path, WriteMode::Append).unwrap();

        assert_eq!(result.write, WriteResult::Created);
        assert_eq!(result.services, 1);
        assert_eq!(result.bytes, 16);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pub struct Svc;\n");
    }
}
