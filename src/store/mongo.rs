//! MongoDB-backed store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Document},
    options::{ClientOptions, FindOptions},
    Client, Collection,
};
use tracing::{debug, info};

use super::{DocumentStore, DocumentUpdate, StoreResult, UpdateOutcome};
use crate::model::{OverallStatus, Submission};

/// Handle on the submissions collection. Cheap to clone; the driver pools connections.
#[derive(Clone, Debug)]
pub struct MongoStore {
    collection: Collection<Submission>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("sentiment-garage".to_string());
        let client = Client::with_options(options)?;
        info!(%database, %collection, "connected to mongodb");
        Ok(Self::from_collection(
            client.database(database).collection(collection),
        ))
    }

    pub fn from_collection(collection: Collection<Submission>) -> Self {
        Self { collection }
    }

    async fn set_fields(&self, filter: Document, update: &DocumentUpdate) -> StoreResult<UpdateOutcome> {
        let fields = set_document(update)?;
        if fields.is_empty() {
            return Ok(UpdateOutcome::Skipped);
        }
        let result = self
            .collection
            .update_one(filter, doc! { "$set": fields }, None)
            .await?;
        debug!(matched = result.matched_count, modified = result.modified_count, "applied $set");
        if result.matched_count == 0 {
            Ok(UpdateOutcome::Skipped)
        } else {
            Ok(UpdateOutcome::Applied)
        }
    }
}

/// Translate an update into the body of a `$set` operator.
pub fn set_document(update: &DocumentUpdate) -> StoreResult<Document> {
    let mut fields = Document::new();
    if let Some(sentences) = &update.sentences {
        fields.insert("sentences", to_bson(sentences)?);
    }
    if let Some(status) = update.overall_status {
        fields.insert("overall_status", status.as_str());
    }
    if let Some(message) = &update.error_message {
        fields.insert("error_message", message.as_str());
    }
    if let Some(topics) = &update.topics {
        fields.insert("topics", to_bson(topics)?);
    }
    if let Some(summary) = &update.summary {
        fields.insert("summary", summary.as_str());
    }
    if let Some(trend) = &update.sentiment_trend {
        fields.insert("sentiment_trend", to_bson(trend)?);
    }
    if let Some(emotions) = &update.overall_emotions {
        fields.insert("overall_emotions", to_bson(emotions)?);
    }
    if let Some(timestamp) = update.timestamp {
        fields.insert("timestamp", timestamp);
    }
    Ok(fields)
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, doc: &Submission) -> StoreResult<()> {
        let result = self.collection.insert_one(doc, None).await?;
        debug!(inserted_id = %result.inserted_id, request_id = %doc.request_id, "inserted document");
        Ok(())
    }

    async fn find_by_request_id(&self, request_id: &str) -> StoreResult<Option<Submission>> {
        Ok(self
            .collection
            .find_one(doc! { "request_id": request_id }, None)
            .await?)
    }

    async fn find_pending(&self, limit: usize) -> StoreResult<Vec<Submission>> {
        // a zero limit means "no limit" to the server
        if limit == 0 {
            return Ok(Vec::new());
        }
        let options = FindOptions::builder()
            .sort(doc! { "timestamp": 1 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();
        let cursor = self
            .collection
            .find(doc! { "overall_status": OverallStatus::Pending.as_str() }, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: &ObjectId, update: &DocumentUpdate) -> StoreResult<UpdateOutcome> {
        self.set_fields(doc! { "_id": *id }, update).await
    }

    async fn update_if_pending(
        &self,
        id: &ObjectId,
        update: &DocumentUpdate,
    ) -> StoreResult<UpdateOutcome> {
        self.set_fields(
            doc! { "_id": *id, "overall_status": OverallStatus::Pending.as_str() },
            update,
        )
        .await
    }
}
