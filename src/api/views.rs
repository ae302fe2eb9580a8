//! Server-rendered pages.

use askama::Template;

use crate::{
    model::Submission,
    report::{charts, emotion_intensity},
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Debug, Clone)]
pub struct SentenceRow {
    pub index: usize,
    pub text: String,
    pub compound: String,
    pub emotions: String,
    pub entities: String,
}

#[derive(Debug, Clone)]
pub struct TopicRow {
    pub id: i32,
    pub terms: String,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub request_id: String,
    pub summary: String,
    pub overall_emotions: Vec<String>,
    pub intensity: Vec<(String, String)>,
    pub topics: Vec<TopicRow>,
    pub sentences: Vec<SentenceRow>,
    /// Chart series as JSON, safe to inline in a `<script>` block.
    pub charts_json: String,
}

impl ResultsPage {
    pub fn from_submission(doc: &Submission) -> Self {
        let sentences = doc
            .sentences
            .iter()
            .enumerate()
            .map(|(idx, record)| SentenceRow {
                index: idx + 1,
                text: record.sentence.clone(),
                compound: record
                    .compound()
                    .map(|c| format!("{c:.3}"))
                    .unwrap_or_else(|| "-".to_string()),
                emotions: if record.emotions.is_empty() {
                    "-".to_string()
                } else {
                    record.emotions.join(", ")
                },
                entities: if record.entities.is_empty() {
                    "No entities found".to_string()
                } else {
                    record
                        .entities
                        .iter()
                        .map(|e| format!("{} ({})", e.text, e.label))
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            })
            .collect();

        let topics = doc
            .topics
            .iter()
            .flatten()
            .map(|(id, terms)| TopicRow {
                id: *id,
                terms: terms.clone(),
            })
            .collect();

        let intensity = emotion_intensity(doc)
            .into_iter()
            .map(|(label, share)| (label, format!("{:.0}%", share * 100.0)))
            .collect();

        Self {
            request_id: doc.request_id.clone(),
            summary: doc.summary.clone().unwrap_or_default(),
            overall_emotions: doc.overall_emotions.clone().unwrap_or_default(),
            intensity,
            topics,
            sentences,
            charts_json: script_json(&charts::build_charts(doc)),
        }
    }
}

#[derive(Template)]
#[template(path = "email_form.html")]
pub struct EmailFormPage {
    pub request_id: String,
}

#[derive(Template)]
#[template(path = "email_sent.html")]
pub struct EmailSentPage {
    pub request_id: String,
    pub email: String,
}

/// Serialise for embedding inside a script tag.
pub fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}
