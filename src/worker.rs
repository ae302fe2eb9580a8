//! Polling worker that drives pending submissions through the pipeline.

use std::sync::Arc;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, instrument, warn};

use crate::{
    config::Settings,
    model::{OverallStatus, SentenceRecord, Submission},
    nlp::{Pipeline, PipelineError},
    store::{DocumentStore, DocumentUpdate, StoreResult, UpdateOutcome},
};

/// Pipeline plus the store it reads from and writes to.
#[derive(Clone)]
pub struct Worker {
    store: Arc<dyn DocumentStore>,
    pipeline: Arc<Pipeline>,
    batch: usize,
}

impl Worker {
    pub fn new(store: Arc<dyn DocumentStore>, pipeline: Pipeline, batch: usize) -> Self {
        Self {
            store,
            pipeline: Arc::new(pipeline),
            batch: batch.max(1),
        }
    }

    pub fn from_settings(store: Arc<dyn DocumentStore>, settings: &Settings) -> Self {
        Self::new(store, Pipeline::new(&settings.analysis), settings.worker_batch)
    }

    /// Process one batch of pending submissions. Returns how many reached a terminal status.
    pub async fn process_pending(&self) -> StoreResult<usize> {
        let pending = self.store.find_pending(self.batch).await?;
        let mut completed = 0;
        for doc in pending {
            if self.process_document(doc).await? == UpdateOutcome::Applied {
                completed += 1;
            }
        }
        Ok(completed)
    }

    /// Analyse one submission and write the outcome back.
    #[instrument(skip_all, fields(request_id = %doc.request_id))]
    pub async fn process_document(&self, doc: Submission) -> StoreResult<UpdateOutcome> {
        let update = self.analyse(doc.sentences).await;
        let status = update.overall_status.unwrap_or(OverallStatus::Error);
        let outcome = self.store.update_if_pending(&doc.id, &update).await?;
        match (outcome, status) {
            (UpdateOutcome::Skipped, _) => {
                warn!("document left pending state before results were written")
            }
            (UpdateOutcome::Applied, OverallStatus::Error) => warn!(
                error = update.error_message.as_deref().unwrap_or_default(),
                "document marked as error"
            ),
            (UpdateOutcome::Applied, _) => info!("processed document"),
        }
        Ok(outcome)
    }

    async fn analyse(&self, sentences: Vec<SentenceRecord>) -> DocumentUpdate {
        let pipeline = Arc::clone(&self.pipeline);
        match tokio::task::spawn_blocking(move || pipeline.evaluate(sentences)).await {
            Ok(update) => update,
            Err(join_err) => {
                error!(%join_err, "analysis task failed");
                DocumentUpdate::failed(PipelineError::Aborted(join_err.to_string()).to_string())
            }
        }
    }

    /// Poll until Ctrl-C. Store failures are logged and the next tick tries again.
    pub async fn run(&self, every: std::time::Duration) -> anyhow::Result<()> {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = every.as_secs(), batch = self.batch, "worker started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.process_pending().await {
                        Ok(0) => {}
                        Ok(count) => info!(count, "completed batch"),
                        Err(err) => error!(%err, "failed to process pending documents"),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown requested; worker stopping");
                    return Ok(());
                }
            }
        }
    }
}
