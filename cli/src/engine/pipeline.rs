//! # Classifier Pipeline
//!
//! File: cli/src/engine/pipeline.rs
//!
//! A fixed two-stage composition: `TfidfVectorizer` followed by
//! `MultinomialNb`. Both stages are fitted together over the preprocessed
//! training questions and invoked together at prediction time.
//!
use super::classifier::MultinomialNb;
use super::vectorizer::TfidfVectorizer;
use crate::core::error::{QabotError, Result};

/// A fitted TF-IDF + naive-Bayes pipeline.
#[derive(Debug, Clone)]
pub struct TextPipeline {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl TextPipeline {
    /// Fits the vectorizer on `documents`, then the classifier on the
    /// resulting vectors and `labels`.
    pub fn fit<D: AsRef<str>, L: AsRef<str>>(documents: &[D], labels: &[L], alpha: f64) -> Result<Self> {
        if documents.len() != labels.len() {
            return Err(QabotError::LengthMismatch {
                questions: documents.len(),
                labels: labels.len(),
            }
            .into());
        }
        let vectorizer = TfidfVectorizer::fit(documents)?;
        let features: Vec<_> = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        let classifier = MultinomialNb::fit(&features, labels, vectorizer.n_features(), alpha)?;
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// The single most probable label for one document.
    pub fn predict(&self, document: &str) -> &str {
        self.classifier.predict(&self.vectorizer.transform(document))
    }

    /// Every label the pipeline can return, sorted.
    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }
}
