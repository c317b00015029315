//! Normalize phase - filters registry rows into records.

use std::fmt;

use eyre::Result;
use svcgen_registry::{ColumnSchema, RawRow};

use crate::{
    Record,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Why a row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The exclude column is set
    Excluded,
    /// The skip-generate column is set
    SkipGenerate,
    /// Both package columns are empty
    NoPackage,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::Excluded => write!(f, "excluded"),
            Skip::SkipGenerate => write!(f, "client generation skipped"),
            Skip::NoPackage => write!(f, "no package name"),
        }
    }
}

/// Decide whether `row` is generated and project it into a record.
///
/// Checks run in order and stop at the first that rejects the row. The
/// package name comes from `package_v1` when the version selector equals
/// `sentinel` and from `package_v2` otherwise, even when that column is
/// empty.
pub fn normalize_row(
    row: &RawRow,
    columns: &ColumnSchema,
    sentinel: &str,
) -> std::result::Result<Record, Skip> {
    if !row.get(columns.exclude).is_empty() {
        return Err(Skip::Excluded);
    }

    if !row.get(columns.skip_generate).is_empty() {
        return Err(Skip::SkipGenerate);
    }

    let package_v1 = row.get(columns.package_v1);
    let package_v2 = row.get(columns.package_v2);
    if package_v1.is_empty() && package_v2.is_empty() {
        return Err(Skip::NoPackage);
    }

    let sdk_version = row.get(columns.sdk_version);
    let package_name = if sdk_version == sentinel {
        package_v1
    } else {
        package_v2
    };

    Ok(Record::new(
        row.get(columns.display_name),
        sdk_version,
        package_name,
    ))
}

/// Phase that filters registry rows and projects them into records.
///
/// Rejected rows are dropped and the rest keep their input order.
pub struct NormalizePhase;

impl Phase for NormalizePhase {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn description(&self) -> &'static str {
        "Filter registry rows into service records"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut records = Vec::with_capacity(ctx.rows.len());
        let mut diagnostics = Vec::new();

        for row in &ctx.rows {
            let location = format!("line {}", row.line());
            match normalize_row(row, &ctx.columns, &ctx.filter.sentinel) {
                Ok(record) => {
                    if record.display_name.trim().is_empty() {
                        diagnostics.push(
                            Diagnostic::error(self.name(), "service has an empty display name")
                                .at(location.clone()),
                        );
                    }
                    if record.package_name.is_empty() {
                        diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!(
                                    "'{}' has no package for SDK version '{}'",
                                    record.display_name, record.sdk_version
                                ),
                            )
                            .at(location),
                        );
                    }
                    records.push(record);
                }
                Err(skip) => {
                    tracing::debug!(line = row.line(), reason = %skip, "skipping row");
                    diagnostics.push(
                        Diagnostic::info(self.name(), format!("skipped: {skip}")).at(location),
                    );
                }
            }
        }

        tracing::debug!(
            accepted = records.len(),
            skipped = ctx.rows.len() - records.len(),
            "normalized registry rows"
        );

        ctx.diagnostics.extend(diagnostics);
        ctx.records = Some(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use svcgen_registry::FilterConfig;

    use super::*;

    // exclude, skip_generate, package_v1, package_v2, display_name, sdk_version
    fn columns() -> ColumnSchema {
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

    fn row(fields: [&str; 6]) -> RawRow {
        RawRow::new(2, fields.into_iter().chain(["", ""]))
    }

    #[test]
    fn test_excluded_row() {
        let r = row(["x", "", "a", "b", "Svc", "2"]);
        assert_eq!(normalize_row(&r, &columns(), "1"), Err(Skip::Excluded));
    }

    #[test]
    fn test_skip_generate_row() {
        let r = row(["", "x", "a", "b", "Svc", "2"]);
        assert_eq!(normalize_row(&r, &columns(), "1"), Err(Skip::SkipGenerate));
    }

    #[test]
    fn test_exclusion_checked_first() {
        let r = row(["x", "x", "", "", "Svc", "2"]);
        assert_eq!(normalize_row(&r, &columns(), "1"), Err(Skip::Excluded));
    }

    #[test]
    fn test_no_package_row() {
        let r = row(["", "", "", "", "Svc", "1"]);
        assert_eq!(normalize_row(&r, &columns(), "1"), Err(Skip::NoPackage));
    }

    #[test]
    fn test_sentinel_selects_v1() {
        let r = row(["", "", "svcv1", "svcv2", "Svc", "1"]);
        assert_eq!(
            normalize_row(&r, &columns(), "1"),
            Ok(Record::new("Svc", "1", "svcv1"))
        );
    }

    #[test]
    fn test_other_version_selects_v2() {
        let r = row(["", "", "svcv1", "svcv2", "Svc", "2"]);
        assert_eq!(
            normalize_row(&r, &columns(), "1").unwrap().package_name,
            "svcv2"
        );
    }

    #[test]
    fn test_empty_version_selects_v2() {
        let r = row(["", "", "svcv1", "svcv2", "Svc", ""]);
        assert_eq!(
            normalize_row(&r, &columns(), "1").unwrap().package_name,
            "svcv2"
        );
    }

    #[test]
    fn test_selected_package_may_be_empty() {
        // v2 is chosen and empty; v1 being set lets the row through
        let r = row(["", "", "svcv1", "", "Svc", "2"]);
        assert_eq!(
            normalize_row(&r, &columns(), "1"),
            Ok(Record::new("Svc", "2", ""))
        );

        let r = row(["", "", "", "svcv2", "Svc", "1"]);
        assert_eq!(
            normalize_row(&r, &columns(), "1"),
            Ok(Record::new("Svc", "1", ""))
        );
    }

    #[test]
    fn test_custom_sentinel() {
        let r = row(["", "", "svcv1", "svcv2", "Svc", "v1"]);
        assert_eq!(
            normalize_row(&r, &columns(), "v1").unwrap().package_name,
            "svcv1"
        );
    }

    #[test]
    fn test_acceptance_matches_predicate() {
        let flags = ["", "x"];
        for exclude in flags {
            for skip in flags {
                for v1 in flags {
                    for v2 in flags {
                        let r = row([exclude, skip, v1, v2, "Svc", "2"]);
                        let expected = exclude.is_empty()
                            && skip.is_empty()
                            && (!v1.is_empty() || !v2.is_empty());
                        assert_eq!(
                            normalize_row(&r, &columns(), "1").is_ok(),
                            expected,
                            "exclude={exclude:?} skip={skip:?} v1={v1:?} v2={v2:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_phase_drops_rejected_and_keeps_order() {
        let rows = vec![
            row(["", "", "", "b", "Beta", "2"]),
            row(["x", "", "a", "b", "Gone", "2"]),
            row(["", "", "a", "", "Alpha", "1"]),
        ];
        let mut ctx = CompilationContext::new(rows, columns(), FilterConfig::default());

        NormalizePhase.run(&mut ctx).unwrap();

        let names: Vec<_> = ctx.records().iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, ["Beta", "Alpha"]);
    }

    #[test]
    fn test_phase_records_diagnostics() {
        let rows = vec![
            row(["x", "", "a", "b", "Gone", "2"]),
            row(["", "", "a", "", "Empty", "2"]),
            row(["", "", "a", "b", "Kept", "2"]),
        ];
        let mut ctx = CompilationContext::new(rows, columns(), FilterConfig::default());

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.records().len(), 2);
        assert_eq!(ctx.warning_count(), 1);
        assert!(!ctx.has_errors());
        assert!(
            ctx.diagnostics
                .iter()
                .any(|d| d.message == "skipped: excluded")
        );
    }

    #[test]
    fn test_phase_flags_empty_display_name() {
        let rows = vec![row(["", "", "a", "b", " ", "2"])];
        let mut ctx = CompilationContext::new(rows, columns(), FilterConfig::default());

        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.records().len(), 1);
        assert_eq!(ctx.error_count(), 1);
    }
}
