//! Persisted submission documents and their per-sentence records.

use std::fmt;

use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message stored on documents that arrive with nothing to analyse.
pub const NO_SENTENCES_MESSAGE: &str = "No sentences to process.";

/// Lifecycle of a whole submission. Only moves forward out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Pending,
    Processed,
    Error,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceStatus {
    Pending,
    Processed,
}

/// Polarity scores for one span of text. `neg + neu + pos` is 1 (up to rounding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl SentimentScores {
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

/// A named entity mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub sentence: String,
    pub status: SentenceStatus,
    pub analysis: Option<SentimentScores>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl SentenceRecord {
    pub fn pending(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            status: SentenceStatus::Pending,
            analysis: None,
            emotions: Vec::new(),
            entities: Vec::new(),
        }
    }

    pub fn compound(&self) -> Option<f64> {
        self.analysis.map(|a| a.compound)
    }
}

/// `(topic id, weighted terms)` where terms read like `0.120*"word" + 0.080*"other"`.
pub type Topic = (i32, String);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub sentence_index: i64,
    pub compound: f64,
}

/// One submission and everything the worker learned about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub request_id: String,
    pub sentences: Vec<SentenceRecord>,
    pub overall_status: OverallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_trend: Option<Vec<TrendPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_emotions: Option<Vec<String>>,
    pub timestamp: DateTime,
}

impl Submission {
    /// Build a fresh pending submission with a new id and request id.
    pub fn pending<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: ObjectId::new(),
            request_id: Uuid::new_v4().to_string(),
            sentences: sentences.into_iter().map(SentenceRecord::pending).collect(),
            overall_status: OverallStatus::Pending,
            error_message: None,
            topics: None,
            summary: None,
            sentiment_trend: None,
            overall_emotions: None,
            timestamp: DateTime::now(),
        }
    }

    pub fn is_processed(&self) -> bool {
        self.overall_status == OverallStatus::Processed
    }

    pub fn timestamp_utc(&self) -> chrono::DateTime<Utc> {
        chrono::DateTime::<Utc>::from_timestamp_millis(self.timestamp.timestamp_millis())
            .unwrap_or_else(Utc::now)
    }
}
