//! TF-IDF text vectorizer.
//!
//! Turns a phrase into a sparse, L2-normalized bag-of-words vector. The
//! vocabulary and the smoothed IDF weights are learned from the training
//! patterns; unseen words are ignored at prediction time.

use crate::error::AppError;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

/// Words of two or more word characters, as in most bag-of-words tokenizers
// NOTE: expect() is acceptable here: the pattern is a compile-time constant
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

/// Sparse row: `(feature index, weight)` pairs sorted by index
pub type SparseRow = Vec<(usize, f64)>;

/// Bag-of-words vectorizer with smoothed IDF weighting
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase and split text into tokens
    pub fn tokenize(text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn vocabulary and IDF weights from a corpus
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<(), AppError> {
        let documents: Vec<Vec<String>> =
            corpus.iter().map(|doc| Self::tokenize(doc.as_ref())).collect();

        let terms: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            return Err(AppError::Training(
                "empty vocabulary; the patterns contain no words".to_string(),
            ));
        }

        // Sorted order gives stable feature indices
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| (term.to_string(), i))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let unique: HashSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t)).copied().collect();
            for index in unique {
                document_frequency[index] += 1;
            }
        }

        let n = documents.len() as f64;
        self.idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = vocabulary;
        Ok(())
    }

    /// Vectorize one text with the learned vocabulary
    pub fn transform(&self, text: &str) -> SparseRow {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in Self::tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        row.sort_unstable_by_key(|(index, _)| *index);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in row.iter_mut() {
                *weight /= norm;
            }
        }
        row
    }

    /// Fit on the corpus, then vectorize each document of it
    pub fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<Vec<SparseRow>, AppError> {
        self.fit(corpus)?;
        Ok(corpus.iter().map(|doc| self.transform(doc.as_ref())).collect())
    }

    /// Number of features (distinct training words)
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Feature index of a word, if it was seen during training
    #[cfg(test)]
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a word, if it was seen during training
    #[cfg(test)]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.feature_index(term).map(|i| self.idf[i])
    }
}
