//! Rule and gazetteer based named entity recognition.

use std::{collections::HashSet, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{model::Entity, nlp::text};

/// Extracted entity span with byte offsets relative to the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub text: String,
    pub score: f64,
}

impl From<Span> for Entity {
    fn from(span: Span) -> Self {
        Entity {
            text: span.text,
            label: span.label,
        }
    }
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> Vec<Span>;
}

static MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|thousand|k|m|bn))?|\b\d[\d,]*(?:\.\d+)?\s(?:dollars|euros|pounds|cents)\b)")
        .expect("valid regex")
});

static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?(?:%|percent\b)").expect("valid regex")
});

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?:(?:January|February|March|April|May|June|July|August|September|October|November|December)",
        r"(?:\s\d{1,2}(?:st|nd|rd|th)?)?(?:,?\s\d{4})?",
        r"|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)",
        r"|(?:yesterday|today|tomorrow|tonight)",
        r"|(?:19|20)\d{2}s?",
        r"|\d{1,2}/\d{1,2}/\d{2,4})\b"
    ))
    .expect("valid regex")
});

static CARDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d[\d,]*(?:\.\d+)?|one|two|three|four|five|six|seven|eight|nine|ten|hundred|thousand|million|billion)\b")
        .expect("valid regex")
});

static PROPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][\w&'.-]*(?:\s+(?:of\s+|&\s+)?[A-Z][\w&'-]*)*").expect("valid regex")
});

const HONORIFICS: &[&str] = &["Mr", "Mrs", "Ms", "Dr", "Prof", "Sir", "Madam", "President", "Senator"];

const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Corporation", "Company", "Co", "Ltd", "LLC", "Group", "University",
    "Institute", "Bank", "Association", "Foundation", "Agency", "College", "Committee",
    "Council", "Department", "Ministry", "Society", "Team",
];

static ORGANISATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Google", "Apple", "Microsoft", "Amazon", "Meta", "Facebook", "Twitter", "Netflix",
        "Tesla", "IBM", "Intel", "Nvidia", "OpenAI", "NASA", "FBI", "CIA", "UN", "NATO", "WHO",
        "EU", "Congress", "Parliament", "Senate", "MongoDB", "Uber", "Samsung", "Sony",
    ]
    .into_iter()
    .collect()
});

static PLACES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "America", "United States", "USA", "US", "UK", "United Kingdom", "England", "Scotland",
        "Ireland", "France", "Germany", "Spain", "Italy", "Portugal", "Canada", "Mexico",
        "Brazil", "Argentina", "China", "Japan", "Korea", "India", "Pakistan", "Russia",
        "Ukraine", "Australia", "Egypt", "Nigeria", "Kenya", "Africa", "Europe", "Asia",
        "New York", "London", "Paris", "Berlin", "Madrid", "Rome", "Tokyo", "Beijing",
        "Shanghai", "Delhi", "Mumbai", "Moscow", "Sydney", "Toronto", "Chicago", "Boston",
        "Seattle", "San Francisco", "Los Angeles", "Washington", "Texas", "California",
        "Florida",
    ]
    .into_iter()
    .collect()
});

static FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "John", "Mary", "James", "Robert", "Michael", "William", "David", "Richard", "Joseph",
        "Thomas", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Paul", "Steven", "Andrew",
        "Joshua", "Kevin", "Brian", "George", "Edward", "Jennifer", "Linda", "Patricia",
        "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah", "Karen", "Nancy", "Lisa", "Emily",
        "Emma", "Olivia", "Sophia", "Anna", "Maria", "Laura", "Alice", "Bob", "Elon", "Bill",
        "Steve", "Barack", "Donald", "Joe", "Taylor",
    ]
    .into_iter()
    .collect()
});

/// Patterns for numeric and temporal entities plus gazetteers for names.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleNer;

impl Ner for RuleNer {
    fn extract(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        spans.extend(find_pattern(text, &MONEY, "MONEY", 0.9));
        spans.extend(find_pattern(text, &PERCENT, "PERCENT", 0.9));
        spans.extend(find_pattern(text, &DATE, "DATE", 0.8));
        spans.extend(find_proper_nouns(text));
        spans.extend(find_pattern(text, &CARDINAL, "CARDINAL", 0.6));
        resolve_overlaps(spans)
    }
}

fn find_pattern(text: &str, pattern: &Regex, label: &str, score: f64) -> Vec<Span> {
    pattern
        .find_iter(text)
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
            label: label.to_string(),
            text: m.as_str().trim().to_string(),
            score,
        })
        .collect()
}

fn find_proper_nouns(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in PROPER.find_iter(text) {
        let mut start = m.start();
        let mut candidate = m.as_str().trim_end_matches(['.', '\'', '-']);

        // Sentence-initial capitalisation says nothing about a common word.
        if text[..start].trim().is_empty() {
            let first = candidate.split_whitespace().next().unwrap_or("");
            if is_common_word(first) {
                match candidate.split_once(char::is_whitespace) {
                    Some((head, rest)) => {
                        start += head.len() + (candidate.len() - head.len() - rest.len());
                        candidate = rest;
                    }
                    None => continue,
                }
            }
        }
        if candidate.is_empty() {
            continue;
        }

        let (candidate, start, titled) = strip_honorific(candidate, start);
        let preceded_by_title = titled
            || preceding_word(text, start)
                .map(|w| HONORIFICS.contains(&w.trim_end_matches('.')))
                .unwrap_or(false);
        if candidate.is_empty() {
            continue;
        }
        if let Some((label, score)) = classify(candidate, preceded_by_title) {
            spans.push(Span {
                start,
                end: start + candidate.len(),
                label: label.to_string(),
                text: candidate.to_string(),
                score,
            });
        }
    }
    spans
}

fn strip_honorific(candidate: &str, start: usize) -> (&str, usize, bool) {
    match candidate.split_once(char::is_whitespace) {
        Some((head, rest)) if HONORIFICS.contains(&head.trim_end_matches('.')) => {
            let rest_trimmed = rest.trim_start();
            (rest_trimmed, start + candidate.len() - rest_trimmed.len(), true)
        }
        _ => (candidate, start, false),
    }
}

fn preceding_word(text: &str, start: usize) -> Option<&str> {
    text[..start].split_whitespace().next_back()
}

fn is_common_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    text::is_stopword(&lower)
        || matches!(
            lower.as_str(),
            "however" | "yesterday" | "today" | "users" | "overall" | "please" | "thanks"
        )
}

fn classify(candidate: &str, preceded_by_title: bool) -> Option<(&'static str, f64)> {
    if DATE.find(candidate).map(|m| m.len()) == Some(candidate.len()) {
        return None;
    }
    let last = candidate.split_whitespace().next_back().unwrap_or(candidate);
    if ORGANISATIONS.contains(candidate) || ORG_SUFFIXES.contains(&last.trim_end_matches('.')) {
        return Some(("ORG", 0.85));
    }
    if PLACES.contains(candidate) {
        return Some(("GPE", 0.85));
    }
    let first = candidate.split_whitespace().next().unwrap_or(candidate);
    if preceded_by_title || FIRST_NAMES.contains(first) {
        return Some(("PERSON", 0.8));
    }
    let is_acronym = (2..=5).contains(&candidate.len())
        && candidate.chars().all(|c| c.is_ascii_uppercase());
    if is_acronym {
        return Some(("ORG", 0.6));
    }
    None
}

/// Keep the earliest, then longest, span wherever spans overlap.
fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then((b.end - b.start).cmp(&(a.end - a.start))));
    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        if kept.last().map(|prev| span.start < prev.end).unwrap_or(false) {
            continue;
        }
        kept.push(span);
    }
    kept
}

/// Default NER implementation used by the pipeline.
pub fn load_model() -> Arc<dyn Ner> {
    Arc::new(RuleNer) as Arc<dyn Ner>
}
