use std::{collections::BTreeSet, sync::Arc};

use sentiment_garage::{
    config::AnalysisSettings,
    model::{OverallStatus, SentenceRecord, SentenceStatus, SentimentScores},
    nlp::{
        ner::{Ner, Span},
        pipeline::{analyze_sentiment, overall_emotions, sentiment_trend},
        sentiment::SentimentAnalyzer,
        Pipeline, PipelineError,
    },
};

fn records(sentences: &[&str]) -> Vec<SentenceRecord> {
    sentences.iter().map(|s| SentenceRecord::pending(*s)).collect()
}

fn sample() -> Vec<SentenceRecord> {
    records(&[
        "I am so happy with the garden this spring.",
        "The rainy weather makes the garden gloomy and sad.",
        "My neighbour was angry about the garden fence.",
        "We celebrate every sunny afternoon in the garden.",
    ])
}

#[test]
fn zero_sentences_is_an_error() {
    let pipeline = Pipeline::new(&AnalysisSettings::default());
    let err = pipeline.process(Vec::new()).unwrap_err();
    assert!(matches!(err, PipelineError::NoSentences));
    assert_eq!(err.to_string(), "No sentences to process.");

    let update = pipeline.evaluate(Vec::new());
    assert_eq!(update.overall_status, Some(OverallStatus::Error));
    assert_eq!(update.error_message.as_deref(), Some("No sentences to process."));
    assert!(update.sentences.is_none());
    assert!(update.topics.is_none());
    assert!(update.summary.is_none());
}

#[test]
fn every_stage_fills_its_output() {
    let pipeline = Pipeline::new(&AnalysisSettings::default());
    let analysis = pipeline.process(sample()).unwrap();

    assert_eq!(analysis.sentences.len(), 4);
    for record in &analysis.sentences {
        assert_eq!(record.status, SentenceStatus::Processed);
        assert!(record.analysis.is_some());
        assert!(!record.emotions.is_empty());
    }
    assert!(!analysis.summary.is_empty());
    assert!(!analysis.topics.is_empty() && analysis.topics.len() <= 5);

    let indices: Vec<i64> = analysis.sentiment_trend.iter().map(|p| p.sentence_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(analysis.sentiment_trend[0].compound > 0.0);
    assert!(analysis.sentiment_trend[1].compound < 0.0);
}

#[test]
fn overall_emotions_is_the_union_of_sentence_emotions() {
    let pipeline = Pipeline::new(&AnalysisSettings::default());
    let analysis = pipeline.process(sample()).unwrap();

    let union: BTreeSet<&str> = analysis
        .sentences
        .iter()
        .flat_map(|s| s.emotions.iter().map(String::as_str))
        .collect();
    let overall: BTreeSet<&str> = analysis.overall_emotions.iter().map(String::as_str).collect();
    assert_eq!(overall, union);
    assert_eq!(overall.len(), analysis.overall_emotions.len());
}

#[test]
fn successful_evaluation_marks_processed() {
    let pipeline = Pipeline::new(&AnalysisSettings::default());
    let update = pipeline.evaluate(sample());
    assert_eq!(update.overall_status, Some(OverallStatus::Processed));
    assert!(update.error_message.is_none());
    assert_eq!(update.sentences.map(|s| s.len()), Some(4));
    assert!(update.timestamp.is_some());
}

#[test]
fn topic_stage_failure_marks_error() {
    let pipeline = Pipeline::new(&AnalysisSettings::default());
    let update = pipeline.evaluate(records(&["It is.", "Was it?"]));
    assert_eq!(update.overall_status, Some(OverallStatus::Error));
    assert_eq!(
        update.error_message.as_deref(),
        Some("Cannot compute topics over an empty vocabulary.")
    );
}

struct FixedNer;

impl Ner for FixedNer {
    fn extract(&self, text: &str) -> Vec<Span> {
        vec![Span {
            start: 0,
            end: text.len(),
            label: "TEST".to_string(),
            text: text.to_string(),
            score: 1.0,
        }]
    }
}

#[test]
fn ner_backend_is_pluggable() {
    let pipeline = Pipeline::new(&AnalysisSettings::default()).with_ner(Arc::new(FixedNer));
    let analysis = pipeline.process(sample()).unwrap();
    for record in &analysis.sentences {
        assert_eq!(record.entities.len(), 1);
        assert_eq!(record.entities[0].label, "TEST");
        assert_eq!(record.entities[0].text, record.sentence);
    }
}

#[test]
fn already_processed_sentences_are_left_alone() {
    let mut done = SentenceRecord::pending("Terrible news.");
    done.status = SentenceStatus::Processed;
    done.analysis = Some(SentimentScores::neutral());

    let scored = analyze_sentiment(&SentimentAnalyzer::new(), vec![done.clone()]);
    assert_eq!(scored, vec![done]);
}

#[test]
fn trend_and_union_helpers() {
    let mut first = SentenceRecord::pending("a");
    first.emotions = vec!["Happy".into(), "Sad".into()];
    let mut second = SentenceRecord::pending("b");
    second.emotions = vec!["Sad".into(), "Fear".into()];
    let sentences = vec![first, second];

    assert_eq!(overall_emotions(&sentences), vec!["Happy", "Sad", "Fear"]);
    let trend = sentiment_trend(&sentences);
    assert_eq!(trend.len(), 2);
    assert!(trend.iter().all(|p| p.compound == 0.0));
}
