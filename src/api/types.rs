//! Shared DTOs for JSON requests and responses.

use serde::{Deserialize, Serialize};

use crate::model::{OverallStatus, SentenceRecord, Submission, Topic, TrendPoint};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisQuery {
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailForm {
    pub email: Option<String>,
}

/// A submission as returned over JSON: id as hex, timestamp as RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDto {
    #[serde(rename = "_id")]
    pub id: String,
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
    pub timestamp: String,
}

impl From<Submission> for AnalysisDto {
    fn from(doc: Submission) -> Self {
        let timestamp = doc.timestamp_utc().to_rfc3339();
        Self {
            id: doc.id.to_hex(),
            request_id: doc.request_id,
            sentences: doc.sentences,
            overall_status: doc.overall_status,
            error_message: doc.error_message,
            topics: doc.topics,
            summary: doc.summary,
            sentiment_trend: doc.sentiment_trend,
            overall_emotions: doc.overall_emotions,
            timestamp,
        }
    }
}
