//! Sort phase - orders records by display name.

use eyre::{Result, eyre};

use crate::{
    Record,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Stable sort by display name in code-point order.
///
/// Records with equal display names keep their relative order, so repeated
/// runs over the same registry produce the same output.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.display_name.cmp(&b.display_name));
}

/// Phase that orders records by display name.
pub struct SortPhase;

impl Phase for SortPhase {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn description(&self) -> &'static str {
        "Order records by display name"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let records = ctx
            .records
            .as_mut()
            .ok_or_else(|| eyre!("records not set - did NormalizePhase run?"))?;

        sort_records(records);

        let duplicates: Vec<String> = records
            .windows(2)
            .filter(|pair| pair[0].display_name == pair[1].display_name)
            .map(|pair| pair[0].display_name.clone())
            .collect();

        for name in duplicates {
            ctx.add_diagnostic(Diagnostic::warning(
                self.name(),
                format!("duplicate display name '{name}'"),
            ));
        }

        Ok(())
    }
}
