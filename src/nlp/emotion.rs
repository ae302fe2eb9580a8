//! Keyword lexicon emotion classifier.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::nlp::text;

/// Label assigned when no emotional keyword is present.
pub const NEUTRAL: &str = "Neutral";

/// Labels in the order they are reported.
pub const EMOTIONS: [&str; 5] = ["Happy", "Angry", "Surprise", "Sad", "Fear"];

static KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 5] = [
        (
            "Happy",
            &[
                "happy", "happiness", "joy", "joyful", "glad", "delight", "delighted", "cheerful",
                "cheer", "love", "loved", "lovely", "wonderful", "great", "excellent", "pleased",
                "pleasure", "smile", "laugh", "fun", "enjoy", "enjoyed", "celebrate", "proud",
                "grateful", "thankful", "excited", "awesome", "fantastic", "amazing", "success",
                "successful", "win", "hope", "hopeful", "blessed", "thrilled", "good", "nice",
            ],
        ),
        (
            "Angry",
            &[
                "angry", "anger", "mad", "furious", "rage", "outraged", "annoyed", "annoying",
                "irritated", "hate", "hated", "hostile", "frustrated", "frustrating", "resent",
                "disgust", "disgusted", "disgusting", "attack", "fight", "yell", "blame", "cruel",
                "unfair", "stupid", "ridiculous", "offended",
            ],
        ),
        (
            "Surprise",
            &[
                "surprise", "surprised", "surprising", "amazed", "astonished", "astonishing",
                "shock", "shocked", "shocking", "unexpected", "unexpectedly", "sudden",
                "suddenly", "wow", "incredible", "unbelievable", "stunned", "startled",
                "remarkable",
            ],
        ),
        (
            "Sad",
            &[
                "sad", "sadness", "unhappy", "sorrow", "grief", "cry", "cried", "tears", "lonely",
                "alone", "depressed", "depression", "miserable", "heartbroken", "regret", "loss",
                "lost", "miss", "missed", "disappointed", "disappointing", "gloomy", "hopeless",
                "tragic", "tragedy", "sorry", "hurt", "pain",
            ],
        ),
        (
            "Fear",
            &[
                "fear", "afraid", "scared", "scary", "frightened", "terrified", "terror", "panic",
                "anxious", "anxiety", "nervous", "worry", "worried", "dread", "danger",
                "dangerous", "threat", "risk", "horror", "alarm", "alarmed", "uneasy", "crisis",
            ],
        ),
    ];
    table
        .into_iter()
        .flat_map(|(label, words)| words.iter().map(move |w| (*w, label)))
        .collect()
});

/// Per-label keyword share for one sentence, every label present.
pub fn emotion_scores(sentence: &str) -> IndexMap<&'static str, f64> {
    let words = text::words(sentence);
    let mut counts: IndexMap<&'static str, f64> = EMOTIONS.iter().map(|e| (*e, 0.0)).collect();
    let mut hits = 0.0;
    for word in &words {
        let label = KEYWORDS
            .get(word.as_str())
            .or_else(|| KEYWORDS.get(text::lemmatize(word).as_str()))
            .copied();
        if let Some(label) = label {
            *counts.entry(label).or_insert(0.0) += 1.0;
            hits += 1.0;
        }
    }
    if hits > 0.0 {
        for value in counts.values_mut() {
            *value = (*value / hits * 100.0).round() / 100.0;
        }
    }
    counts
}

/// Dominant label(s) for a sentence: every label tied for the top positive
/// score, or [`NEUTRAL`] when none scores.
pub fn detect_emotions(sentence: &str) -> Vec<String> {
    let scores = emotion_scores(sentence);
    let top = scores.values().copied().fold(0.0_f64, f64::max);
    if top <= 0.0 {
        return vec![NEUTRAL.to_string()];
    }
    scores
        .into_iter()
        .filter(|(_, score)| *score == top)
        .map(|(label, _)| label.to_string())
        .collect()
}
