//! The fixed analysis pipeline applied to one submission.

use std::sync::Arc;

use indexmap::IndexSet;
use mongodb::bson::DateTime;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    config::AnalysisSettings,
    model::{OverallStatus, SentenceRecord, SentenceStatus, Topic, TrendPoint, NO_SENTENCES_MESSAGE},
    nlp::{
        emotion,
        ner::{self, Ner},
        sentiment::SentimentAnalyzer,
        summarize,
        topics::{self, TopicError, TopicModelConfig},
    },
    store::DocumentUpdate,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{}", NO_SENTENCES_MESSAGE)]
    NoSentences,

    #[error(transparent)]
    Topics(#[from] TopicError),

    #[error("Analysis aborted: {0}")]
    Aborted(String),
}

/// Everything a successful run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub sentences: Vec<SentenceRecord>,
    pub topics: Vec<Topic>,
    pub summary: String,
    pub sentiment_trend: Vec<TrendPoint>,
    pub overall_emotions: Vec<String>,
}

impl Analysis {
    /// Fields written back on success.
    pub fn into_update(self) -> DocumentUpdate {
        DocumentUpdate {
            sentences: Some(self.sentences),
            overall_status: Some(OverallStatus::Processed),
            topics: Some(self.topics),
            summary: Some(self.summary),
            sentiment_trend: Some(self.sentiment_trend),
            overall_emotions: Some(self.overall_emotions),
            timestamp: Some(DateTime::now()),
            ..DocumentUpdate::default()
        }
    }
}

#[derive(Clone)]
pub struct Pipeline {
    sentiment: SentimentAnalyzer,
    ner: Arc<dyn Ner>,
    topics: TopicModelConfig,
    summary_sentences: usize,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("topics", &self.topics)
            .field("summary_sentences", &self.summary_sentences)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
            ner: ner::load_model(),
            topics: TopicModelConfig::with_topics(settings.num_topics),
            summary_sentences: settings.summary_sentences,
        }
    }

    pub fn with_ner(mut self, ner: Arc<dyn Ner>) -> Self {
        self.ner = ner;
        self
    }

    /// Run every stage. Any stage failure aborts the whole run.
    #[instrument(skip_all, fields(sentences = sentences.len()))]
    pub fn process(&self, sentences: Vec<SentenceRecord>) -> Result<Analysis, PipelineError> {
        if sentences.is_empty() {
            return Err(PipelineError::NoSentences);
        }
        let sentences = analyze_sentiment(&self.sentiment, sentences);
        let texts: Vec<&str> = sentences.iter().map(|s| s.sentence.as_str()).collect();
        let topics = topics::model_topics(&texts, &self.topics)?;
        let summary = summarize::summarize(&texts, self.summary_sentences);
        let sentences = detect_emotions(sentences);
        let sentences = recognize_entities(self.ner.as_ref(), sentences);
        let sentiment_trend = sentiment_trend(&sentences);
        let overall_emotions = overall_emotions(&sentences);
        debug!(topics = topics.len(), emotions = ?overall_emotions, "pipeline finished");

        Ok(Analysis {
            sentences,
            topics,
            summary,
            sentiment_trend,
            overall_emotions,
        })
    }

    /// Process and translate the outcome into the update to store.
    pub fn evaluate(&self, sentences: Vec<SentenceRecord>) -> DocumentUpdate {
        match self.process(sentences) {
            Ok(analysis) => analysis.into_update(),
            Err(err) => DocumentUpdate::failed(err.to_string()),
        }
    }
}

/// Score every pending sentence and mark it processed. Already processed
/// sentences pass through untouched.
pub fn analyze_sentiment(
    analyzer: &SentimentAnalyzer,
    sentences: Vec<SentenceRecord>,
) -> Vec<SentenceRecord> {
    sentences
        .into_iter()
        .map(|record| match record.status {
            SentenceStatus::Pending => SentenceRecord {
                analysis: Some(analyzer.polarity_scores(&record.sentence)),
                status: SentenceStatus::Processed,
                ..record
            },
            SentenceStatus::Processed => record,
        })
        .collect()
}

/// Attach dominant emotions to every sentence that has sentiment scores.
pub fn detect_emotions(sentences: Vec<SentenceRecord>) -> Vec<SentenceRecord> {
    sentences
        .into_iter()
        .map(|record| {
            if record.analysis.is_none() {
                return record;
            }
            SentenceRecord {
                emotions: emotion::detect_emotions(&record.sentence),
                ..record
            }
        })
        .collect()
}

pub fn recognize_entities(ner: &dyn Ner, sentences: Vec<SentenceRecord>) -> Vec<SentenceRecord> {
    sentences
        .into_iter()
        .map(|record| SentenceRecord {
            entities: ner.extract(&record.sentence).into_iter().map(Into::into).collect(),
            ..record
        })
        .collect()
}

/// `(index, compound)` per sentence in original order; unscored sentences count as 0.
pub fn sentiment_trend(sentences: &[SentenceRecord]) -> Vec<TrendPoint> {
    sentences
        .iter()
        .enumerate()
        .map(|(idx, record)| TrendPoint {
            sentence_index: idx as i64,
            compound: record.compound().unwrap_or(0.0),
        })
        .collect()
}

/// Distinct emotion labels across all sentences, in first-seen order.
pub fn overall_emotions(sentences: &[SentenceRecord]) -> Vec<String> {
    sentences
        .iter()
        .flat_map(|record| record.emotions.iter().cloned())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}
