//! Latent Dirichlet allocation over sentence bags-of-words.
//!
//! Each sentence is one document. The model is fitted with collapsed Gibbs
//! sampling from a fixed seed, so the same input always yields the same
//! topics.

use indexmap::IndexMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::{model::Topic, nlp::text};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopicError {
    #[error("Cannot compute topics over an empty vocabulary.")]
    EmptyVocabulary,
}

#[derive(Debug, Clone)]
pub struct TopicModelConfig {
    pub num_topics: usize,
    /// Terms printed per topic.
    pub num_words: usize,
    pub iterations: usize,
    pub alpha: f64,
    pub beta: f64,
    pub seed: u64,
    /// Drop terms found in fewer documents than this.
    pub no_below: usize,
    /// Drop terms found in more than this fraction of documents.
    pub no_above: f64,
    /// Frequency filtering only kicks in from this many documents.
    pub min_filter_docs: usize,
}

impl Default for TopicModelConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            num_words: 4,
            iterations: 200,
            alpha: 0.1,
            beta: 0.01,
            seed: 42,
            no_below: 2,
            no_above: 0.9,
            min_filter_docs: 10,
        }
    }
}

impl TopicModelConfig {
    pub fn with_topics(num_topics: usize) -> Self {
        Self {
            num_topics,
            ..Self::default()
        }
    }
}

/// Token ↔ id mapping with per-token document frequencies.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    token_ids: IndexMap<String, usize>,
    doc_freq: Vec<usize>,
    num_docs: usize,
}

impl Dictionary {
    pub fn from_documents(docs: &[Vec<String>]) -> Self {
        let mut dict = Self {
            num_docs: docs.len(),
            ..Self::default()
        };
        for doc in docs {
            let mut seen = vec![false; dict.doc_freq.len()];
            for token in doc {
                let next_id = dict.token_ids.len();
                let id = *dict.token_ids.entry(token.clone()).or_insert(next_id);
                if id == dict.doc_freq.len() {
                    dict.doc_freq.push(0);
                    seen.push(false);
                }
                if !seen[id] {
                    seen[id] = true;
                    dict.doc_freq[id] += 1;
                }
            }
        }
        dict
    }

    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token_ids.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.token_ids.get_index(id).map(|(t, _)| t.as_str())
    }

    /// Keep tokens seen in at least `no_below` documents and at most
    /// `no_above` of all documents. Ids are reassigned compactly.
    pub fn filter_extremes(&self, no_below: usize, no_above: f64) -> Self {
        let max_docs = (no_above * self.num_docs as f64).floor() as usize;
        let mut filtered = Self {
            num_docs: self.num_docs,
            ..Self::default()
        };
        for (token, &id) in &self.token_ids {
            let df = self.doc_freq[id];
            if df >= no_below && df <= max_docs {
                filtered.token_ids.insert(token.clone(), filtered.doc_freq.len());
                filtered.doc_freq.push(df);
            }
        }
        filtered
    }

    pub fn doc2ids(&self, doc: &[String]) -> Vec<usize> {
        doc.iter().filter_map(|t| self.id(t)).collect()
    }
}

/// Discover topics across `sentences`. Returns `min(num_topics, vocabulary)` topics,
/// or none at all for empty input.
pub fn model_topics<S: AsRef<str>>(
    sentences: &[S],
    config: &TopicModelConfig,
) -> Result<Vec<Topic>, TopicError> {
    if sentences.is_empty() || config.num_topics == 0 {
        return Ok(Vec::new());
    }
    let docs: Vec<Vec<String>> = sentences
        .iter()
        .map(|s| text::content_words(s.as_ref()))
        .collect();
    let mut dictionary = Dictionary::from_documents(&docs);
    if docs.len() >= config.min_filter_docs {
        let filtered = dictionary.filter_extremes(config.no_below, config.no_above);
        if filtered.is_empty() {
            debug!("frequency filter would empty the dictionary; keeping all terms");
        } else {
            dictionary = filtered;
        }
    }
    if dictionary.is_empty() {
        return Err(TopicError::EmptyVocabulary);
    }

    let num_topics = config.num_topics.min(dictionary.len());
    if num_topics < config.num_topics {
        info!(
            requested = config.num_topics,
            actual = num_topics,
            "reduced topic count to dictionary size"
        );
    }
    let corpus: Vec<Vec<usize>> = docs.iter().map(|d| dictionary.doc2ids(d)).collect();
    let model = GibbsLda::fit(&corpus, dictionary.len(), num_topics, config);

    Ok((0..num_topics)
        .map(|topic| (topic as i32, model.describe(topic, config.num_words, &dictionary)))
        .collect())
}

struct GibbsLda {
    topic_word: Vec<Vec<usize>>,
    topic_totals: Vec<usize>,
    beta: f64,
    vocab: usize,
}

impl GibbsLda {
    fn fit(corpus: &[Vec<usize>], vocab: usize, k: usize, config: &TopicModelConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut doc_topic = vec![vec![0usize; k]; corpus.len()];
        let mut topic_word = vec![vec![0usize; vocab]; k];
        let mut topic_totals = vec![0usize; k];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(corpus.len());

        for (d, doc) in corpus.iter().enumerate() {
            let mut z = Vec::with_capacity(doc.len());
            for &w in doc {
                let t = rng.gen_range(0..k);
                doc_topic[d][t] += 1;
                topic_word[t][w] += 1;
                topic_totals[t] += 1;
                z.push(t);
            }
            assignments.push(z);
        }

        let vocab_beta = vocab as f64 * config.beta;
        let mut weights = vec![0.0f64; k];
        for _ in 0..config.iterations {
            for (d, doc) in corpus.iter().enumerate() {
                for (n, &w) in doc.iter().enumerate() {
                    let old = assignments[d][n];
                    doc_topic[d][old] -= 1;
                    topic_word[old][w] -= 1;
                    topic_totals[old] -= 1;

                    let mut total = 0.0;
                    for t in 0..k {
                        let weight = (doc_topic[d][t] as f64 + config.alpha)
                            * (topic_word[t][w] as f64 + config.beta)
                            / (topic_totals[t] as f64 + vocab_beta);
                        total += weight;
                        weights[t] = total;
                    }
                    let draw = rng.gen::<f64>() * total;
                    let new = weights.iter().position(|&c| draw < c).unwrap_or(k - 1);

                    assignments[d][n] = new;
                    doc_topic[d][new] += 1;
                    topic_word[new][w] += 1;
                    topic_totals[new] += 1;
                }
            }
        }

        Self {
            topic_word,
            topic_totals,
            beta: config.beta,
            vocab,
        }
    }

    fn term_weight(&self, topic: usize, word: usize) -> f64 {
        (self.topic_word[topic][word] as f64 + self.beta)
            / (self.topic_totals[topic] as f64 + self.vocab as f64 * self.beta)
    }

    fn describe(&self, topic: usize, num_words: usize, dictionary: &Dictionary) -> String {
        let mut ranked: Vec<(usize, f64)> = (0..self.vocab)
            .map(|w| (w, self.term_weight(topic, w)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(num_words.max(1))
            .filter_map(|(w, weight)| {
                dictionary
                    .token(w)
                    .map(|token| format!("{weight:.3}*\"{token}\""))
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Parse a printed topic back into `(term, weight)` pairs. Malformed parts are skipped.
pub fn parse_terms(terms: &str) -> Vec<(String, f64)> {
    terms
        .split('+')
        .filter_map(|part| {
            let (weight, word) = part.trim().split_once('*')?;
            let weight: f64 = weight.trim().parse().ok()?;
            let word = word.trim().trim_matches('"').trim();
            (!word.is_empty()).then(|| (word.to_string(), weight))
        })
        .collect()
}
