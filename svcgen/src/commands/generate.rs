use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use svcgen_codegen::{Generator, Pipeline, Renderer, pipeline::TracingPlugin};
use svcgen_core::WriteMode;
use svcgen_registry::{Config, Registry};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to svcgen.toml (defaults to ./svcgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Registry CSV (overrides svcgen.toml)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Generated source file (overrides svcgen.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the generated source without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Replace the output file instead of appending to it
    #[arg(long)]
    pub truncate: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).unwrap_or_exit();
        let registry_path = self.registry.as_ref().unwrap_or(&config.registry.path);
        let output = self.output.as_ref().unwrap_or(&config.output.path);

        let registry = Registry::open(registry_path, &config.columns).unwrap_or_exit();
        tracing::info!(
            registry = %registry_path.display(),
            rows = registry.len(),
            "generating client configuration"
        );

        let renderer = Renderer::client_config().wrap_err("Failed to load template")?;
        let pipeline = Pipeline::new()
            .renderer(renderer)
            .columns(config.columns)
            .filter(config.filter.clone())
            .plugin(TracingPlugin);
        let ctx = pipeline.run(registry).wrap_err("Pipeline failed")?;

        if ctx.has_errors() {
            for diag in ctx.errors() {
                eprintln!("{diag}");
            }
            eyre::bail!(
                "{} has {} invalid service(s)",
                registry_path.display(),
                ctx.error_count()
            );
        }

        for diag in ctx.warnings() {
            eprintln!("{diag}");
        }

        let generator = Generator::from_context(ctx)?;

        if self.dry_run {
            print!("{}", generator.preview());
            return Ok(());
        }

        let mode = if self.truncate {
            WriteMode::Truncate
        } else {
            WriteMode::Append
        };

        println!("Generating {}", output.display());
        let result = generator
            .generate(output, mode)
            .wrap_err("Failed to generate code")?;

        tracing::info!(
            path = %result.path.display(),
            services = result.services,
            bytes = result.bytes,
            write = ?result.write,
            "wrote client configuration"
        );

        Ok(())
    }
}
