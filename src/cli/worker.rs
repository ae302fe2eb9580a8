//! CLI entry-point for the analysis worker.

use std::time::Duration;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, store, worker::Worker};

/// Args for the `worker` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Process a single batch and exit.
    #[arg(long)]
    pub once: bool,
    /// Override the polling interval in seconds.
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let store = store::connect(&settings).await?;
    let worker = Worker::from_settings(store, &settings);

    if args.once {
        let completed = worker.process_pending().await?;
        info!(completed, "single batch finished");
        return Ok(());
    }

    let every = args
        .interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.poll_interval());
    worker.run(every).await
}
