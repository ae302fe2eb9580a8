//! Lexicon and rule based polarity scoring in the style of VADER.
//!
//! Each token found in the lexicon contributes its valence, adjusted by
//! preceding booster words, negations within three tokens, ALL-CAPS
//! emphasis and a `but` contrast. The summed valence is squashed into a
//! compound score in `[-1, 1]`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{model::SentimentScores, nlp::text};

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    include_str!("data/sentiment_lexicon.tsv")
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .filter_map(|line| {
            let (word, valence) = line.split_once('\t')?;
            Some((word.trim().to_string(), valence.trim().parse().ok()?))
        })
        .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
        "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly",
        "more", "most", "particularly", "purely", "quite", "really", "remarkably", "so",
        "substantially", "thoroughly", "totally", "tremendously", "truly", "unbelievably",
        "utterly", "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
        "partly", "scarcely", "slightly", "somewhat", "sorta",
    ];
    increments
        .into_iter()
        .map(|w| (w, BOOST_INCREMENT))
        .chain(decrements.into_iter().map(|w| (w, BOOST_DECREMENT)))
        .collect()
});

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent", "without", "wont",
    "wouldnt", "rarely", "seldom", "despite",
];

/// Scores sentences with the bundled lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Polarity scores for one piece of text. Empty or lexicon-free text is neutral.
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens = text::cased_tokens(text);
        if tokens.is_empty() {
            return SentimentScores::neutral();
        }
        let caps_differ = caps_differential(&tokens);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut valences = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let lower = &lowered[i];
            if BOOSTERS.contains_key(lower.as_str()) {
                valences.push(0.0);
                continue;
            }
            if lower == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
                valences.push(0.0);
                continue;
            }
            valences.push(token_valence(token, i, &lowered, caps_differ));
        }
        apply_but_contrast(&lowered, &mut valences);
        score_valences(&valences, text)
    }
}

fn caps_differential(tokens: &[String]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

fn token_valence(token: &str, i: usize, lowered: &[String], caps_differ: bool) -> f64 {
    let Some(&base) = LEXICON.get(&lowered[i]) else {
        return 0.0;
    };
    let mut valence = base;
    if caps_differ && is_all_caps(token) {
        valence += CAPS_INCREMENT * valence.signum();
    }
    for distance in 0..3 {
        if i <= distance {
            break;
        }
        let prior = &lowered[i - (distance + 1)];
        if LEXICON.contains_key(prior) {
            continue;
        }
        let mut scalar = booster_scalar(prior, valence);
        scalar *= match distance {
            1 => 0.95,
            2 => 0.9,
            _ => 1.0,
        };
        valence += scalar;
        if is_negation(prior) {
            valence *= NEGATION_SCALAR;
        }
    }
    valence
}

fn booster_scalar(word: &str, valence: f64) -> f64 {
    match BOOSTERS.get(word) {
        Some(&scalar) if valence < 0.0 => -scalar,
        Some(&scalar) => scalar,
        None => 0.0,
    }
}

fn is_negation(word: &str) -> bool {
    let bare: String = word.chars().filter(|c| *c != '\'').collect();
    NEGATIONS.contains(&bare.as_str()) || word.ends_with("n't")
}

/// Dampen sentiment before `but`, emphasise sentiment after it.
fn apply_but_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, valence) in valences.iter_mut().enumerate() {
        if idx < pivot {
            *valence *= 0.5;
        } else if idx > pivot {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valences(valences: &[f64], text: &str) -> SentimentScores {
    if valences.iter().all(|v| *v == 0.0) {
        return SentimentScores::neutral();
    }
    let emphasis = punctuation_emphasis(text);
    let mut total: f64 = valences.iter().sum();
    if total > 0.0 {
        total += emphasis;
    } else if total < 0.0 {
        total -= emphasis;
    }
    let compound = normalize(total);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neutral = 0.0;
    for &v in valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neutral += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }
    let denominator = pos_sum + neg_sum.abs() + neutral;

    SentimentScores {
        neg: round_to((neg_sum / denominator).abs(), 3),
        neu: round_to((neutral / denominator).abs(), 3),
        pos: round_to((pos_sum / denominator).abs(), 3),
        compound: round_to(compound, 4),
    }
}
