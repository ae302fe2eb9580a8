//! Mapping of handler failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::types::{ErrorBody, MessageBody};
use crate::{
    report::{MailError, ReportError},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input data.")]
    InvalidInput,

    #[error("Input text is empty.")]
    EmptyText,

    #[error("Database insertion error.")]
    Insert(#[source] StoreError),

    #[error("Database query error.")]
    Query(#[source] StoreError),

    #[error("No analysis found")]
    AnalysisNotFound,

    #[error("Document not found")]
    DocumentNotFound,

    #[error("{0}")]
    ProcessingFailed(String),

    #[error("Results not available.")]
    ResultsUnavailable,

    #[error("Email address is required.")]
    EmailRequired,

    #[error("Failed to send email: {0}")]
    Mail(#[from] MailError),

    #[error("Failed to build report: {0}")]
    Report(#[from] ReportError),

    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput
            | Self::EmptyText
            | Self::ProcessingFailed(_)
            | Self::EmailRequired => StatusCode::BAD_REQUEST,
            Self::AnalysisNotFound | Self::DocumentNotFound | Self::ResultsUnavailable => {
                StatusCode::NOT_FOUND
            }
            Self::Insert(_) | Self::Query(_) | Self::Mail(_) | Self::Report(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Insert(err) | Self::Query(err) => error!(%err, "store failure"),
            Self::Mail(err) => error!(%err, "mail failure"),
            Self::Report(err) => error!(%err, "report failure"),
            Self::Template(err) => error!(%err, "template failure"),
            _ => {}
        }
        let message = self.to_string();
        match self {
            // JSON endpoints answering with a `message` key
            Self::AnalysisNotFound => (status, Json(MessageBody { message })).into_response(),
            // page endpoints answer in plain text
            Self::ResultsUnavailable
            | Self::EmailRequired
            | Self::Mail(_)
            | Self::Report(_)
            | Self::Template(_) => (status, message).into_response(),
            _ => (status, Json(ErrorBody { error: message })).into_response(),
        }
    }
}
