// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Maps normalised text to a fixed-dimension sparse vector.
//
// Fitting, over a corpus of n documents:
//   1. Tokenise each document: runs of 2+ word characters
//   2. Vocabulary = every distinct token, sorted alphabetically
//   3. If there are more than `max_features` tokens, keep the
//      most frequent ones (total count across the corpus); ties
//      go to the alphabetically smaller token. Kept tokens are
//      re-indexed in alphabetical order.
//   4. idf(t) = ln((1 + n) / (1 + df(t))) + 1
//
// Transforming one document:
//   x[t] = count(t) * idf(t), then the vector is scaled to unit
//   L2 norm. Tokens outside the vocabulary are ignored, so an
//   empty or fully unknown document becomes the zero vector.
//
// The fitted state is immutable and serialisable; the artifact
// stores it next to the classifier.

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

// ─── SparseVector ─────────────────────────────────────────────────────────────
/// A sparse feature vector. `indices` are strictly increasing and
/// `values[i]` is the weight of column `indices[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values:  Vec<f32>,
}

impl SparseVector {
    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    /// Write this vector into a dense row of width `dim`.
    pub fn write_dense(&self, row: &mut [f32]) {
        for (idx, value) in self.iter() {
            row[idx] = value;
        }
    }
}

// ─── TfidfVectorizer ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
    vocabulary:   BTreeMap<String, usize>,
    idf:          Vec<f32>,
}

impl TfidfVectorizer {
    pub fn new(max_features: Option<usize>) -> Self {
        Self { max_features, ..Default::default() }
    }

    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// Number of feature columns
    pub fn num_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Learn the vocabulary and IDF weights from `documents`.
    /// Fails if no document contains a single token.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq:    HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for token in tokenize(doc.as_ref()) {
                *term_counts.entry(token).or_insert(0) += 1;
                if seen.insert(token) {
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        if term_counts.is_empty() {
            bail!("empty vocabulary; every document normalised to no usable tokens");
        }

        let mut terms: Vec<&str> = term_counts.keys().copied().collect();
        terms.sort_unstable();

        if let Some(limit) = self.max_features {
            if terms.len() > limit {
                // Stable sort keeps alphabetical order among equal counts
                terms.sort_by(|a, b| term_counts[b].cmp(&term_counts[a]));
                terms.truncate(limit);
                terms.sort_unstable();
            }
        }

        let n_docs = documents.len() as f64;
        self.idf = terms
            .iter()
            .map(|t| (((1.0 + n_docs) / (1.0 + doc_freq[t] as f64)).ln() + 1.0) as f32)
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, t)| (t.to_string(), idx))
            .collect();

        tracing::debug!("TF-IDF vocabulary fitted: {} terms", self.idf.len());
        Ok(())
    }

    /// Map one document into the fitted feature space.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector {
            indices: counts.keys().copied().collect(),
            values:  counts.iter().map(|(&idx, &tf)| tf * self.idf[idx]).collect(),
        };

        let norm = vector.norm();
        if norm > 0.0 {
            vector.values.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        Ok(self.transform_all(documents))
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str())
}
