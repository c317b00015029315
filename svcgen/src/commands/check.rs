use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use svcgen_codegen::{Pipeline, Severity};
use svcgen_registry::{Config, Registry};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to svcgen.toml (defaults to ./svcgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Registry CSV (overrides svcgen.toml)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).unwrap_or_exit();
        let registry_path = self.registry.as_ref().unwrap_or(&config.registry.path);

        let registry = Registry::open(registry_path, &config.columns).unwrap_or_exit();
        let row_count = registry.len();

        let pipeline = Pipeline::new()
            .columns(config.columns)
            .filter(config.filter.clone());
        let ctx = pipeline.check(registry).wrap_err("Validation failed")?;

        // Print all diagnostics
        let mut has_errors = false;
        let mut has_warnings = false;
        for diag in &ctx.diagnostics {
            match diag.severity {
                Severity::Error => {
                    has_errors = true;
                    eprintln!("error: {}", diag.message);
                    if let Some(loc) = &diag.location {
                        eprintln!("  --> {}", loc);
                    }
                }
                Severity::Warning => {
                    has_warnings = true;
                    eprintln!("warning: {}", diag.message);
                    if let Some(loc) = &diag.location {
                        eprintln!("  --> {}", loc);
                    }
                }
                Severity::Info => {
                    tracing::debug!(location = ?diag.location, "{}", diag.message);
                }
            }
        }

        if has_errors {
            std::process::exit(1);
        }

        if has_warnings {
            println!();
        }

        println!("✓ {} is valid\n", registry_path.display());

        let records = ctx.records();
        println!(
            "  {} of {} row{} generate a client:",
            records.len(),
            row_count,
            if row_count == 1 { "" } else { "s" }
        );
        for record in records {
            println!(
                "    {} (v{}, {})",
                record.display_name, record.sdk_version, record.package_name
            );
        }

        Ok(())
    }
}
