//! CLI entry-point for writing a PDF report to disk.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, report::render_pdf, store};

/// Args for the `report` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Request id returned at submission time.
    #[arg(long)]
    pub request_id: String,
    /// Destination PDF path.
    #[arg(long, default_value = "analysis_results.pdf")]
    pub out: PathBuf,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let store = store::connect(&settings).await?;
    let doc = store
        .find_by_request_id(&args.request_id)
        .await?
        .ok_or_else(|| anyhow!("no submission with request id {}", args.request_id))?;
    if !doc.is_processed() {
        bail!("submission {} is {}", args.request_id, doc.overall_status);
    }

    let pdf = render_pdf(&doc)?;
    tokio::fs::write(&args.out, &pdf)
        .await
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!(path = %args.out.display(), bytes = pdf.len(), "report written");
    Ok(())
}
