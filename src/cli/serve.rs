//! CLI entry-point for serving the web front end.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{error, instrument};

use crate::{
    api::{self, AppState},
    config::Settings,
    report::SmtpMailer,
    store,
    worker::Worker,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 5000).
    #[arg(long, default_value_t = 5000)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Also run the analysis worker inside this process.
    #[arg(long)]
    pub with_worker: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let store = store::connect(&settings).await?;
    let mailer = Arc::new(SmtpMailer::new(settings.smtp.clone()));

    if args.with_worker {
        let worker = Worker::from_settings(Arc::clone(&store), &settings);
        let every = settings.poll_interval();
        tokio::spawn(async move {
            if let Err(err) = worker.run(every).await {
                error!(%err, "embedded worker stopped");
            }
        });
    }

    api::serve(AppState::new(store, mailer), &args.host, args.port).await
}
