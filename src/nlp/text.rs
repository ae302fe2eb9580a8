//! Sentence segmentation and word-level tokenisation shared by the analysers.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Abbreviations whose trailing period never ends a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "mt", "vs", "e.g", "i.e", "approx", "dept",
];

/// Abbreviations only when a number follows, as in "No. 5" or "Mar. 3".
/// Elsewhere ("they said no.") the period is an ordinary full stop.
const NUMBERED_ABBREVIATIONS: &[&str] = &[
    "no", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Split free text into trimmed, non-empty sentences in reading order.
///
/// A sentence ends at a run of `.`, `!` or `?` (plus closing quotes or
/// brackets) followed by whitespace, unless the period belongs to a known
/// abbreviation or an initial, or the next word starts in lowercase.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }
        let first_terminator = i;
        let mut j = i;
        while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
            j += 1;
        }
        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }
        let end = chars.get(j).map(|(idx, _)| *idx).unwrap_or(text.len());
        let at_boundary = j >= chars.len() || chars[j].1.is_whitespace();
        let next = next_visible(&chars[j..]);
        if at_boundary
            && !is_abbreviation(text, chars[first_terminator].0, c, next)
            && !next.is_some_and(char::is_lowercase)
        {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j.max(i + 1);
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, span: &str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn is_abbreviation(text: &str, period_at: usize, terminator: char, next: Option<char>) -> bool {
    if terminator != '.' {
        return false;
    }
    let before = &text[..period_at];
    let word = before
        .rsplit(|ch: char| ch.is_whitespace() || ch == '(' || ch == '"')
        .next()
        .unwrap_or("");
    if word.is_empty() {
        return false;
    }
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    if NUMBERED_ABBREVIATIONS.contains(&lower.as_str()) {
        return next.is_some_and(|ch| ch.is_ascii_digit());
    }
    // single initials such as "J. R. R. Tolkien"
    let mut letters = word.chars();
    matches!((letters.next(), letters.next()), (Some(ch), None) if ch.is_uppercase())
}

fn next_visible(rest: &[(usize, char)]) -> Option<char> {
    rest.iter().map(|(_, ch)| *ch).find(|ch| !ch.is_whitespace())
}

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid regex"));

/// Lowercased alphanumeric word tokens.
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Whitespace tokens with surrounding punctuation removed, original case kept.
/// Single-character tokens are dropped.
pub fn cased_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|ch: char| !ch.is_alphanumeric()))
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
        "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn", "also", "would",
        "could", "us",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Reduce common English plural and inflection forms to a base form.
pub fn lemmatize(word: &str) -> String {
    let len = word.chars().count();
    if len <= 3 || !word.is_ascii() {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if len > 4 {
            return format!("{stem}y");
        }
    }
    if word.ends_with("sses") || word.ends_with("xes") || word.ends_with("ches") || word.ends_with("shes") {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Content words for bag-of-words models: alphanumeric, lemmatised, no stopwords.
pub fn content_words(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .map(|w| lemmatize(&w))
        .filter(|w| !is_stopword(w) && w.chars().count() > 1)
        .collect()
}
