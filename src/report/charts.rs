//! Chart series derived from a processed submission.
//!
//! The same series feed the HTML dashboard (serialised to JSON) and the PDF
//! renderer (drawn as vector graphics).

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    model::Submission,
    nlp::{emotion, topics},
};

pub const HISTOGRAM_BINS: usize = 20;

/// Labels tracked by the emotional-shift chart.
pub const SHIFT_LABELS: [&str; 6] = ["Happy", "Angry", "Surprise", "Sad", "Fear", emotion::NEUTRAL];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    /// Compound score per sentence index.
    Line { points: Vec<(f64, f64)> },
    /// Counts over equal-width bins spanning `[min, max]`.
    Histogram { min: f64, max: f64, counts: Vec<usize> },
    /// One bar per label.
    Bars { labels: Vec<String>, values: Vec<f64> },
    /// Per-series 0/1 presence over sentence positions.
    Stacked { labels: Vec<String>, series: Vec<Vec<f64>> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub chart: Chart,
}

/// All charts that have data for this submission, in report order.
pub fn build_charts(doc: &Submission) -> Vec<ChartSpec> {
    [
        sentiment_trend(doc),
        sentiment_distribution(doc),
        topic_terms(doc),
        emotion_breakdown(doc),
        sentiment_intensity(doc),
        emotional_shifts(doc),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn sentiment_trend(doc: &Submission) -> Option<ChartSpec> {
    let trend = doc.sentiment_trend.as_ref().filter(|t| !t.is_empty())?;
    Some(ChartSpec {
        key: "sentiment_trend",
        title: "Sentiment Trend",
        x_label: "Sentence Index",
        y_label: "Compound Score",
        chart: Chart::Line {
            points: trend
                .iter()
                .map(|p| (p.sentence_index as f64, p.compound))
                .collect(),
        },
    })
}

pub fn sentiment_distribution(doc: &Submission) -> Option<ChartSpec> {
    let scores: Vec<f64> = doc.sentences.iter().filter_map(|s| s.compound()).collect();
    if scores.is_empty() {
        return None;
    }
    Some(ChartSpec {
        key: "sentiment_distribution",
        title: "Sentiment Distribution",
        x_label: "Compound Score",
        y_label: "Frequency",
        chart: Chart::Histogram {
            min: -1.0,
            max: 1.0,
            counts: histogram(&scores, -1.0, 1.0, HISTOGRAM_BINS),
        },
    })
}

/// Equal-width bin counts; values outside the range land in the edge bins.
pub fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins.max(1)];
    let width = (max - min) / counts.len() as f64;
    for &value in values {
        let idx = ((value - min) / width).floor();
        let idx = if idx.is_nan() { 0.0 } else { idx.clamp(0.0, (counts.len() - 1) as f64) };
        counts[idx as usize] += 1;
    }
    counts
}

/// Term weights summed across topics, heaviest first.
pub fn topic_term_weights(doc: &Submission) -> IndexMap<String, f64> {
    let mut weights: IndexMap<String, f64> = IndexMap::new();
    for (_, terms) in doc.topics.iter().flatten() {
        for (term, weight) in topics::parse_terms(terms) {
            *weights.entry(term).or_insert(0.0) += weight;
        }
    }
    weights.sort_by(|_, a, _, b| b.total_cmp(a));
    weights
}

pub fn topic_terms(doc: &Submission) -> Option<ChartSpec> {
    let weights = topic_term_weights(doc);
    if weights.is_empty() {
        return None;
    }
    let (labels, values) = weights.into_iter().take(15).unzip();
    Some(ChartSpec {
        key: "topics_terms",
        title: "Topic Terms",
        x_label: "Term",
        y_label: "Weight",
        chart: Chart::Bars { labels, values },
    })
}

/// How many sentences carry each label, in first-seen order.
pub fn emotion_counts(doc: &Submission) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for sentence in &doc.sentences {
        for label in &sentence.emotions {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
    }
    counts
}

pub fn emotion_breakdown(doc: &Submission) -> Option<ChartSpec> {
    let counts = emotion_counts(doc);
    if counts.is_empty() {
        return None;
    }
    let (labels, values) = counts.into_iter().map(|(l, c)| (l, c as f64)).unzip();
    Some(ChartSpec {
        key: "overall_emotions",
        title: "Overall Emotional Distribution",
        x_label: "Emotion",
        y_label: "Sentences",
        chart: Chart::Bars { labels, values },
    })
}

pub fn sentiment_intensity(doc: &Submission) -> Option<ChartSpec> {
    let scored: Vec<(usize, f64)> = doc
        .sentences
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| s.compound().map(|c| (idx + 1, c)))
        .collect();
    if scored.is_empty() {
        return None;
    }
    let (labels, values) = scored.into_iter().map(|(i, c)| (i.to_string(), c)).unzip();
    Some(ChartSpec {
        key: "sentiment_intensity",
        title: "Sentiment Intensity per Sentence",
        x_label: "Sentence Index",
        y_label: "Compound Score",
        chart: Chart::Bars { labels, values },
    })
}

pub fn emotional_shifts(doc: &Submission) -> Option<ChartSpec> {
    if doc.sentences.is_empty() {
        return None;
    }
    let series = SHIFT_LABELS
        .iter()
        .map(|label| {
            doc.sentences
                .iter()
                .map(|s| if s.emotions.iter().any(|e| e == label) { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();
    Some(ChartSpec {
        key: "emotional_shifts",
        title: "Emotional Shifts Over Sentences",
        x_label: "Sentence Index",
        y_label: "Emotion Intensity",
        chart: Chart::Stacked {
            labels: SHIFT_LABELS.iter().map(|l| l.to_string()).collect(),
            series,
        },
    })
}
