//! CLI entry-point for submitting text from a file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, model::Submission, nlp::split_sentences, store};

/// Args for the `seed` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Plain-text file to submit.
    #[arg(long)]
    pub file: PathBuf,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("reading {}", args.file.display()))?;
    if text.trim().is_empty() {
        bail!("{} contains no text", args.file.display());
    }

    let store = store::connect(&settings).await?;
    let doc = Submission::pending(split_sentences(&text));
    let request_id = doc.request_id.clone();
    let sentences = doc.sentences.len();
    store.insert(&doc).await?;

    info!(%request_id, sentences, "submission stored");
    println!("{request_id}");
    Ok(())
}
