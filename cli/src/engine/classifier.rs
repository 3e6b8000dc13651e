//! # Multinomial Naive Bayes
//!
//! File: cli/src/engine/classifier.rs
//!
//! ## Overview
//!
//! A multinomial naive-Bayes classifier over non-negative sparse features
//! (here, TF-IDF weights). Each class is an answer label from the training
//! data, so prediction is closed-world: only labels seen while fitting are
//! ever returned.
//!
//! ## Model
//!
//! For classes `c` (sorted lexicographically) and features `t`:
//!
//! - `log_prior(c) = ln(n_c / n)`
//! - `fc(c, t)` = sum of feature `t` over the documents labelled `c`
//! - `log_prob(c, t) = ln((fc(c, t) + alpha) / (Σ_t fc(c, t) + alpha * n_features))`
//!
//! A vector `x` is scored as `log_prior(c) + Σ_t x_t * log_prob(c, t)` and the
//! highest score wins. Equal scores resolve to the earliest class in sorted
//! order, which makes predictions deterministic. A vector with no known
//! features falls back to the class priors.
//!
use super::vectorizer::SparseVector;
use crate::core::error::{QabotError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// A fitted multinomial naive-Bayes model.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// # Fit (`fit`)
    ///
    /// Estimates class priors and smoothed per-class feature probabilities.
    ///
    /// ## Arguments
    ///
    /// * `features`: one sparse vector per training document.
    /// * `labels`: the class of each document, parallel to `features`.
    /// * `n_features`: dimensionality of the feature space.
    /// * `alpha`: additive smoothing, must be positive.
    ///
    /// ## Errors
    ///
    /// `EmptyDataset` for no documents, `LengthMismatch` when `features` and
    /// `labels` differ in length, `Config` for a non-positive `alpha`.
    pub fn fit<L: AsRef<str>>(
        features: &[SparseVector],
        labels: &[L],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(QabotError::LengthMismatch {
                questions: features.len(),
                labels: labels.len(),
            }
            .into());
        }
        if features.is_empty() {
            return Err(QabotError::EmptyDataset.into());
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(QabotError::Config(format!("alpha must be positive, got {}", alpha)).into());
        }

        let mut class_index: BTreeMap<&str, usize> = BTreeMap::new();
        for label in labels {
            class_index.insert(label.as_ref(), 0);
        }
        let classes: Vec<String> = class_index.keys().map(|c| c.to_string()).collect();
        for (index, slot) in class_index.values_mut().enumerate() {
            *slot = index;
        }

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];
        for (x, label) in features.iter().zip(labels) {
            let c = class_index[label.as_ref()];
            class_count[c] += 1;
            for &(feature, value) in x {
                feature_count[c][feature] += value;
            }
        }

        let n_documents = features.len() as f64;
        let class_log_prior = class_count
            .iter()
            .map(|&count| (count as f64 / n_documents).ln())
            .collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .into_iter()
                    .map(|count| ((count + alpha) / total).ln())
                    .collect()
            })
            .collect();

        debug!(
            "Fitted naive Bayes: {} classes, {} features, {} documents",
            classes.len(),
            n_features,
            features.len()
        );
        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// The class labels, in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Unnormalised log posterior of every class for `x`, in `classes()` order.
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + x.iter()
                        .filter_map(|&(feature, value)| log_prob.get(feature).map(|lp| value * lp))
                        .sum::<f64>()
            })
            .collect()
    }

    /// The most probable class for `x`.
    pub fn predict(&self, x: &SparseVector) -> &str {
        let scores = self.joint_log_likelihood(x);
        let mut best = 0;
        for (index, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = index;
            }
        }
        &self.classes[best]
    }
}
