//! Command-line front end for the team finder engine.
//!
//! Loads the processed team corpus (plus optional Showdown vocabulary blobs)
//! and answers free-text queries, or reports corpus statistics.
//!
//! Usage:
//!   cargo run -p finder_cli -- query "a team with Garchomp holding Rocky Helmet"
//!   cargo run -p finder_cli -- query "3 tall pokemon" --json
//!   cargo run -p finder_cli -- inspect --data data/processed_data.json

mod cmd;
mod models;
mod utils;
mod vocab;

use clap::{Parser, Subcommand};
use cmd::{inspect, query};

#[derive(Parser)]
#[command(name = "finder_cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a free-text query against the corpus
    Query(query::QueryArgs),

    /// Report corpus and lexicon statistics
    Inspect(inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Query(args)) => query::execute(args),
        Some(Commands::Inspect(args)) => inspect::execute(args),
        None => {
            // Require an explicit subcommand.
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
