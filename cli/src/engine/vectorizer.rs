//! # TF-IDF Vectorizer
//!
//! File: cli/src/engine/vectorizer.rs
//!
//! ## Overview
//!
//! Turns documents into sparse, L2-normalised TF-IDF vectors.
//!
//! - Terms are extracted from lowercased text with the pattern `\b\w\w+\b`, so
//!   punctuation and single-character tokens never become features.
//! - The vocabulary holds every distinct training term; feature indices follow
//!   the sorted order of the terms, which keeps fitting deterministic.
//! - IDF is smoothed as if one extra document contained every term:
//!   `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
//! - A document's vector is `count(t) * idf(t)` for each known term, scaled to
//!   unit Euclidean length. Terms outside the vocabulary are ignored.
//!
use crate::core::error::{QabotError, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;
use tracing::debug;

static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Sparse feature vector: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// A fitted TF-IDF vectorizer.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// # Fit (`fit`)
    ///
    /// Learns the vocabulary and IDF weights from `documents`.
    ///
    /// ## Errors
    ///
    /// `EmptyDataset` when there are no documents, `EmptyVocabulary` when no
    /// document contains a term of two or more word characters.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        if documents.is_empty() {
            return Err(QabotError::EmptyDataset.into());
        }

        let term_sets: Vec<BTreeSet<String>> = documents
            .iter()
            .map(|doc| extract_terms(doc.as_ref()).into_iter().collect())
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &term_sets {
            for term in terms {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(QabotError::EmptyVocabulary.into());
        }

        let n_documents = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        // BTreeMap iterates in sorted term order.
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0);
        }

        debug!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            idf.len(),
            documents.len()
        );
        Ok(Self { vocabulary, idf })
    }

    /// Number of features (vocabulary size).
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Feature index of `term`, if it was seen during fitting.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Maps one document to its normalised TF-IDF vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in extract_terms(document) {
            if let Some(index) = self.term_index(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in vector.iter_mut() {
                *value /= norm;
            }
        }
        vector
    }
}

fn extract_terms(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_vocabulary_is_sorted_and_skips_short_tokens() {
        let vec = TfidfVectorizer::fit(&["zebra apple , a", "mango apple ?"]).unwrap();
        assert_eq!(vec.n_features(), 3);
        assert_eq!(vec.term_index("apple"), Some(0));
        assert_eq!(vec.term_index("mango"), Some(1));
        assert_eq!(vec.term_index("zebra"), Some(2));
        assert_eq!(vec.term_index("a"), None);
        assert_eq!(vec.term_index(","), None);
    }

    #[test]
    fn test_smoothed_idf() {
        let vec = TfidfVectorizer::fit(&["apple mango", "apple"]).unwrap();
        // apple in both documents: ln(3/3) + 1
        assert!(approx_eq(vec.idf[vec.term_index("apple").unwrap()], 1.0));
        // mango in one: ln(3/2) + 1
        assert!(approx_eq(vec.idf[vec.term_index("mango").unwrap()], (1.5f64).ln() + 1.0));
    }

    #[test]
    fn test_transform_is_unit_length() {
        let vec = TfidfVectorizer::fit(&["apple mango", "apple", "kiwi kiwi mango"]).unwrap();
        let x = vec.transform("Mango kiwi kiwi");
        let norm: f64 = x.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!(approx_eq(norm, 1.0));
        // Sorted by feature index.
        assert!(x.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_unknown_terms_give_empty_vector() {
        let vec = TfidfVectorizer::fit(&["apple mango"]).unwrap();
        assert!(vec.transform("completely unseen words").is_empty());
        assert!(vec.transform("").is_empty());
    }

    #[test]
    fn test_fit_errors() {
        let empty: [&str; 0] = [];
        let err = TfidfVectorizer::fit(&empty).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QabotError>(),
            Some(QabotError::EmptyDataset)
        ));

        let err = TfidfVectorizer::fit(&["a ?", "b !"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QabotError>(),
            Some(QabotError::EmptyVocabulary)
        ));
    }
}
