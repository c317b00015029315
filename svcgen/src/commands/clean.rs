use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use clap::Args;
use eyre::{Context, Result};
use svcgen_registry::Config;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CleanCommand {
    /// Path to svcgen.toml (defaults to ./svcgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generated source file (overrides svcgen.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be deleted without deleting it
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).unwrap_or_exit();
        let output = self.output.as_ref().unwrap_or(&config.output.path);

        if self.dry_run {
            if output.exists() {
                println!("Would remove {}", output.display());
            }
            return Ok(());
        }

        if remove_output(output)? {
            println!("Removed {}", output.display());
        } else {
            println!("Nothing to clean: {} does not exist", output.display());
        }
        Ok(())
    }
}

/// Delete the generated file. Returns `false` when there was nothing to delete.
fn remove_output(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).wrap_err_with(|| format!("error removing file ({})", path.display())),
    }
}
