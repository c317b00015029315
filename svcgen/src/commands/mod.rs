mod check;
mod clean;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on registry errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for svcgen_registry::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "svcgen")]
#[command(version)]
#[command(about = "Generate service client configuration from a CSV registry")]
pub(crate) struct Cli {
    /// Log pipeline progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the client configuration source from the registry
    Generate(GenerateCommand),

    /// Validate the registry without generating code
    Check(CheckCommand),

    /// Remove the generated output file
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
