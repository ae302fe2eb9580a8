//! Runtime configuration utilities for sentiment-garage.

use std::{env, str::FromStr, time::Duration};

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// MongoDB connection string. Unset selects the in-memory store.
    pub mongo_uri: Option<String>,
    /// Database holding the submissions collection.
    pub mongo_db: String,
    /// Submissions collection name.
    pub mongo_collection: String,
    pub smtp: SmtpSettings,
    /// Delay between worker polls.
    pub poll_interval_secs: u64,
    /// Maximum pending documents pulled per poll.
    pub worker_batch: usize,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address; falls back to the username.
    pub from: Option<String>,
}

impl SmtpSettings {
    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.username.as_deref())
    }
}

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    pub num_topics: usize,
    pub summary_sentences: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            num_topics: 5,
            summary_sentences: 5,
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = AnalysisSettings::default();
        Ok(Self {
            mongo_uri: non_empty_var("MONGO_URI"),
            mongo_db: env::var("MONGO_DB").unwrap_or_else(|_| "sentiment".to_string()),
            mongo_collection: env::var("MONGO_COLLECTION").unwrap_or_else(|_| "texts".to_string()),
            smtp: SmtpSettings {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                port: parsed_var("SMTP_PORT").unwrap_or(587),
                username: non_empty_var("SMTP_USERNAME"),
                password: non_empty_var("SMTP_PASSWORD"),
                from: non_empty_var("MAIL_FROM"),
            },
            poll_interval_secs: parsed_var("POLL_INTERVAL_SECS").unwrap_or(5),
            worker_batch: parsed_var("WORKER_BATCH").unwrap_or(32),
            analysis: AnalysisSettings {
                num_topics: parsed_var("NUM_TOPICS").unwrap_or(defaults.num_topics),
                summary_sentences: parsed_var("SUMMARY_SENTENCES")
                    .unwrap_or(defaults.summary_sentences),
            },
        })
    }

    /// Settings for tests and embedded use: in-memory store, no SMTP credentials.
    pub fn local() -> Self {
        Self {
            mongo_uri: None,
            mongo_db: "sentiment".to_string(),
            mongo_collection: "texts".to_string(),
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 587,
                username: None,
                password: None,
                from: None,
            },
            poll_interval_secs: 5,
            worker_batch: 32,
            analysis: AnalysisSettings::default(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
