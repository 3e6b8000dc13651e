//! # qabot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout qabot. Domain failures
//! (a missing dataset, a malformed CSV row, an invalid split fraction) are
//! expressed as variants of `QabotError`; everything is propagated as
//! `anyhow::Error` so call sites can attach context.
//!
//! ## Architecture
//!
//! The error system consists of two components:
//! - `QabotError`: a `thiserror` enum for specific failure kinds
//! - `Result<T>`: a type alias for `anyhow::Result<T>`
//!
//! The request path of the web UI never produces a `QabotError`: blank input
//! renders the placeholder and unknown words are handled by the model's priors.
//! Errors only surface during startup (configuration, dataset loading, training)
//! or when a template fails to render.
//!
//! ## Examples
//!
//! ```rust
//! if records.is_empty() {
//!     return Err(QabotError::EmptyDataset)?;
//! }
//!
//! let text = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for qabot.
#[derive(Error, Debug)]
pub enum QabotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error in '{path}': {reason}")]
    Dataset { path: String, reason: String },

    #[error("CSV parsing failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("Cannot train on an empty dataset.")]
    EmptyDataset,

    #[error("No usable terms in the training questions (every token is shorter than two characters).")]
    EmptyVocabulary,

    #[error("Got {questions} questions but {labels} answer labels.")]
    LengthMismatch { questions: usize, labels: usize },

    #[error("Invalid hold-out fraction {0}: expected a value in [0, 1).")]
    InvalidSplit(f64),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = QabotError::Config("alpha must be positive".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: alpha must be positive"
        );

        let dataset_err = QabotError::Dataset {
            path: "qa.csv".into(),
            reason: "missing column 'Answer'".into(),
        };
        assert_eq!(
            dataset_err.to_string(),
            "Dataset error in 'qa.csv': missing column 'Answer'"
        );

        let mismatch = QabotError::LengthMismatch {
            questions: 3,
            labels: 2,
        };
        assert_eq!(mismatch.to_string(), "Got 3 questions but 2 answer labels.");

        assert_eq!(
            QabotError::InvalidSplit(1.5).to_string(),
            "Invalid hold-out fraction 1.5: expected a value in [0, 1)."
        );
    }
}
