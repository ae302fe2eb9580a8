//! Derived views over processed submissions: charts, PDF report, email.

pub mod charts;
pub mod mail;
pub mod pdf;

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::Submission;

pub use mail::{Mailer, MailError, SmtpMailer};
pub use pdf::render_pdf;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Share of sentences carrying each emotion label.
///
/// With one label per sentence the ratios sum to 1. Documents without
/// sentences yield an empty map.
pub fn emotion_intensity(doc: &Submission) -> IndexMap<String, f64> {
    let total = doc.sentences.len();
    if total == 0 {
        return IndexMap::new();
    }
    charts::emotion_counts(doc)
        .into_iter()
        .map(|(label, count)| (label, count as f64 / total as f64))
        .collect()
}
