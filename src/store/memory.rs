//! Process-local store used by tests and single-process deployments.

use async_trait::async_trait;
use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{DocumentStore, DocumentUpdate, StoreError, StoreResult, UpdateOutcome};
use crate::model::{OverallStatus, Submission};

/// Insertion-ordered map of submissions behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<IndexMap<ObjectId, Submission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    pub async fn get(&self, id: &ObjectId) -> Option<Submission> {
        self.docs.read().await.get(id).cloned()
    }

    async fn apply(
        &self,
        id: &ObjectId,
        update: &DocumentUpdate,
        require_pending: bool,
    ) -> StoreResult<UpdateOutcome> {
        let mut docs = self.docs.write().await;
        match docs.get_mut(id) {
            Some(doc) if require_pending && doc.overall_status != OverallStatus::Pending => {
                Ok(UpdateOutcome::Skipped)
            }
            Some(doc) => {
                update.apply_to(doc);
                Ok(UpdateOutcome::Applied)
            }
            None => Ok(UpdateOutcome::Skipped),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, doc: &Submission) -> StoreResult<()> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(&doc.id) {
            return Err(StoreError::Duplicate(doc.id));
        }
        docs.insert(doc.id, doc.clone());
        Ok(())
    }

    async fn find_by_request_id(&self, request_id: &str) -> StoreResult<Option<Submission>> {
        let docs = self.docs.read().await;
        Ok(docs.values().find(|d| d.request_id == request_id).cloned())
    }

    async fn find_pending(&self, limit: usize) -> StoreResult<Vec<Submission>> {
        let docs = self.docs.read().await;
        Ok(docs
            .values()
            .filter(|d| d.overall_status == OverallStatus::Pending)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &ObjectId, update: &DocumentUpdate) -> StoreResult<UpdateOutcome> {
        self.apply(id, update, false).await
    }

    async fn update_if_pending(
        &self,
        id: &ObjectId,
        update: &DocumentUpdate,
    ) -> StoreResult<UpdateOutcome> {
        self.apply(id, update, true).await
    }
}
