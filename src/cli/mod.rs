//! Command-line interface wiring for sentiment-garage.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod report;
pub mod seed;
pub mod serve;
pub mod worker;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Sentence-level sentiment analysis service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Worker(args) => worker::run(args, settings).await,
            Commands::Seed(args) => seed::run(args, settings).await,
            Commands::Report(args) => report::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the web front end and JSON API.
    Serve(serve::Args),
    /// Poll the store and analyse pending submissions.
    Worker(worker::Args),
    /// Submit the contents of a text file, as the web form would.
    Seed(seed::Args),
    /// Render the PDF report for a processed submission.
    Report(report::Args),
}
