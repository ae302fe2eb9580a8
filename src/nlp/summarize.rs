//! Extractive summarisation with LexRank.

use std::collections::HashMap;

use crate::nlp::text;

const SIMILARITY_THRESHOLD: f64 = 0.1;
const DAMPING: f64 = 0.85;
const EPSILON: f64 = 1e-6;
const MAX_ITERATIONS: usize = 100;

/// Pick up to `count` central sentences and join them in original order.
///
/// Returns an empty string only when `sentences` is empty.
pub fn summarize<S: AsRef<str>>(sentences: &[S], count: usize) -> String {
    if sentences.is_empty() || count == 0 {
        return String::new();
    }
    if sentences.len() <= count {
        return join(sentences.iter().map(AsRef::as_ref));
    }
    let scores = lexrank_scores(sentences);
    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    let mut chosen: Vec<usize> = ranked.into_iter().take(count).collect();
    chosen.sort_unstable();
    join(chosen.into_iter().map(|i| sentences[i].as_ref()))
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stationary centrality of each sentence in the thresholded cosine graph.
pub fn lexrank_scores<S: AsRef<str>>(sentences: &[S]) -> Vec<f64> {
    let n = sentences.len();
    if n == 0 {
        return Vec::new();
    }
    let bags: Vec<Vec<String>> = sentences
        .iter()
        .map(|s| {
            text::words(s.as_ref())
                .into_iter()
                .filter(|w| !text::is_stopword(w))
                .collect()
        })
        .collect();
    let idf = inverse_document_frequency(&bags);
    let vectors: Vec<HashMap<&str, f64>> = bags.iter().map(|bag| tf_idf(bag, &idf)).collect();

    let mut adjacency = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let similarity = if i == j { 1.0 } else { cosine(&vectors[i], &vectors[j]) };
            if similarity > SIMILARITY_THRESHOLD {
                adjacency[i][j] = 1.0;
            }
        }
    }
    for row in adjacency.iter_mut() {
        let degree: f64 = row.iter().sum();
        if degree > 0.0 {
            row.iter_mut().for_each(|v| *v /= degree);
        }
    }

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        for (i, row) in adjacency.iter().enumerate() {
            for (j, weight) in row.iter().enumerate() {
                next[j] += DAMPING * scores[i] * weight;
            }
        }
        let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;
        if delta < EPSILON {
            break;
        }
    }
    scores
}

fn inverse_document_frequency(bags: &[Vec<String>]) -> HashMap<&str, f64> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for bag in bags {
        let mut seen: Vec<&str> = bag.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        for word in seen {
            *df.entry(word).or_insert(0) += 1;
        }
    }
    let n = bags.len() as f64;
    df.into_iter()
        .map(|(word, count)| (word, (n / count as f64).ln() + 1.0))
        .collect()
}

fn tf_idf<'a>(bag: &'a [String], idf: &HashMap<&str, f64>) -> HashMap<&'a str, f64> {
    let mut tf: HashMap<&str, f64> = HashMap::new();
    for word in bag {
        *tf.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    tf.into_iter()
        .map(|(word, count)| (word, count * idf.get(word).copied().unwrap_or(1.0)))
        .collect()
}

fn cosine(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, x)| b.get(word).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
