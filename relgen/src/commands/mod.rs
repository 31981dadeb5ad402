mod check;
mod completions;
mod generate;
mod list;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;

/// Extension trait for exiting on configuration and store errors with
/// pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for relgen_meta::Result<T> {
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
#[command(name = "relgen")]
#[command(version)]
#[command(about = "Generate a CRUD + GraphQL server scaffold from relational metadata")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run().await,
            Commands::Check(cmd) => cmd.run().await,
            Commands::List(cmd) => cmd.run().await,
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all artifacts from the metadata store
    Generate(GenerateCommand),

    /// Load the metadata and report inconsistencies without generating
    Check(CheckCommand),

    /// List entities, columns and relations from the metadata store
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
