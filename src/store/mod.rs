//! Document store backends.
//!
//! Every write after the initial insert is a partial update: only the fields
//! set on a [`DocumentUpdate`] are touched, everything else on the stored
//! document is preserved (`$set` semantics). Concurrent writers to the same
//! document race per field, last write wins.

mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use thiserror::Error;
use tracing::warn;

use crate::{
    config::Settings,
    model::{OverallStatus, SentenceRecord, Submission, Topic, TrendPoint},
};

pub use memory::MemoryStore;
pub use mongo::{set_document, MongoStore};

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("bson encoding error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("bson decoding error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("duplicate document id {0}")]
    Duplicate(ObjectId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Field-level update applied to one stored submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpdate {
    pub sentences: Option<Vec<SentenceRecord>>,
    pub overall_status: Option<OverallStatus>,
    pub error_message: Option<String>,
    pub topics: Option<Vec<Topic>>,
    pub summary: Option<String>,
    pub sentiment_trend: Option<Vec<TrendPoint>>,
    pub overall_emotions: Option<Vec<String>>,
    pub timestamp: Option<DateTime>,
}

impl DocumentUpdate {
    /// Update that terminates a submission with an error and touches nothing else.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            overall_status: Some(OverallStatus::Error),
            error_message: Some(message.into()),
            timestamp: Some(DateTime::now()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the listed fields onto an in-memory document.
    pub fn apply_to(&self, doc: &mut Submission) {
        if let Some(sentences) = &self.sentences {
            doc.sentences = sentences.clone();
        }
        if let Some(status) = self.overall_status {
            doc.overall_status = status;
        }
        if let Some(message) = &self.error_message {
            doc.error_message = Some(message.clone());
        }
        if let Some(topics) = &self.topics {
            doc.topics = Some(topics.clone());
        }
        if let Some(summary) = &self.summary {
            doc.summary = Some(summary.clone());
        }
        if let Some(trend) = &self.sentiment_trend {
            doc.sentiment_trend = Some(trend.clone());
        }
        if let Some(emotions) = &self.overall_emotions {
            doc.overall_emotions = Some(emotions.clone());
        }
        if let Some(timestamp) = self.timestamp {
            doc.timestamp = timestamp;
        }
    }
}

/// Outcome of a conditional update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// No document matched the id (and precondition, if any).
    Skipped,
}

/// Persistence seam shared by the web tier and the worker.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a brand-new submission.
    async fn insert(&self, doc: &Submission) -> StoreResult<()>;

    /// Look a submission up by its client-facing request id.
    async fn find_by_request_id(&self, request_id: &str) -> StoreResult<Option<Submission>>;

    /// Oldest-first pending submissions, at most `limit`.
    async fn find_pending(&self, limit: usize) -> StoreResult<Vec<Submission>>;

    /// Set the listed fields on the document with `id`.
    async fn update(&self, id: &ObjectId, update: &DocumentUpdate) -> StoreResult<UpdateOutcome>;

    /// Like [`DocumentStore::update`], but only while the document is still pending.
    async fn update_if_pending(
        &self,
        id: &ObjectId,
        update: &DocumentUpdate,
    ) -> StoreResult<UpdateOutcome>;
}

/// Open the backend selected by the settings.
pub async fn connect(settings: &Settings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &settings.mongo_uri {
        Some(uri) => {
            let store =
                MongoStore::connect(uri, &settings.mongo_db, &settings.mongo_collection).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("MONGO_URI not set; using a process-local in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
