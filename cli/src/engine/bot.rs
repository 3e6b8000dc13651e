//! # ChatBot
//!
//! File: cli/src/engine/bot.rs
//!
//! ## Overview
//!
//! `ChatBot` owns a fitted `TextPipeline` and exposes the inference function,
//! `get_response`: preprocess the raw question, predict, and return the chosen
//! answer exactly as it appeared in the training data. There is no confidence
//! threshold and no fallback; every question gets the best-scoring stored
//! answer.
//!
//! The bot is built once at startup (`from_dataset`) and never mutated, so it
//! can be shared behind an `Arc` by concurrent request handlers.
//!
//! ## Examples
//!
//! ```rust
//! let bot = ChatBot::fit(&[QaRecord::new("hello", "hi there")], 1.0)?;
//! assert_eq!(bot.get_response("  HELLO "), "hi there");
//! assert_eq!(bot.respond("   "), None);
//! ```
//!
use super::dataset::{self, QaRecord};
use super::pipeline::TextPipeline;
use super::preprocess::preprocess;
use super::split::train_test_split;
use crate::core::config::ModelConfig;
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// A trained question-answering model.
#[derive(Debug, Clone)]
pub struct ChatBot {
    pipeline: TextPipeline,
    training_rows: usize,
}

impl ChatBot {
    /// Loads the CSV at `path` and trains on it according to `model`.
    pub fn from_dataset(path: &Path, model: &ModelConfig) -> Result<Self> {
        let records = dataset::load_dataset(path)?;
        Self::train(&records, model)
    }

    /// Trains on `records`, first holding out `model.test_size` of them with
    /// `model.seed` when the fraction is non-zero.
    pub fn train(records: &[QaRecord], model: &ModelConfig) -> Result<Self> {
        let (train, held_out) = train_test_split(records, model.test_size, model.seed)?;
        if !held_out.is_empty() {
            info!(
                "Holding out {} of {} rows (test_size {}, seed {})",
                held_out.len(),
                records.len(),
                model.test_size,
                model.seed
            );
        }
        Self::fit(&train, model.alpha)
    }

    /// Trains on every record in `records`.
    pub fn fit(records: &[QaRecord], alpha: f64) -> Result<Self> {
        let questions: Vec<String> = records.iter().map(|r| preprocess(&r.question)).collect();
        let answers: Vec<&str> = records.iter().map(|r| r.answer.as_str()).collect();
        let pipeline = TextPipeline::fit(&questions, &answers, alpha)?;
        info!(
            "Trained on {} questions: {} distinct answers, {} vocabulary terms",
            records.len(),
            pipeline.labels().len(),
            pipeline.vocabulary_size()
        );
        Ok(Self {
            pipeline,
            training_rows: records.len(),
        })
    }

    /// # Get Response (`get_response`)
    ///
    /// Maps a raw question to the most probable stored answer.
    pub fn get_response(&self, question: &str) -> &str {
        let prepared = preprocess(question);
        let answer = self.pipeline.predict(&prepared);
        debug!("Question {:?} -> answer {:?}", prepared, answer);
        answer
    }

    /// Like `get_response`, but returns `None` for input that is blank after
    /// trimming instead of predicting.
    pub fn respond(&self, input: &str) -> Option<&str> {
        if input.trim().is_empty() {
            None
        } else {
            Some(self.get_response(input))
        }
    }

    /// Every answer the bot can give, sorted.
    pub fn answers(&self) -> &[String] {
        self.pipeline.labels()
    }

    pub fn training_rows(&self) -> usize {
        self.training_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::QabotError;

    fn sample_records() -> Vec<QaRecord> {
        vec![
            QaRecord::new("hello", "hi there"),
            QaRecord::new("What is your name?", "I am qabot."),
            QaRecord::new("How are you doing today?", "Great, thanks for asking!"),
            QaRecord::new("What's the weather like?", "I cannot see outside, sorry."),
            QaRecord::new("Tell me a joke", "Why did the crab never share? Because it was shellfish."),
            QaRecord::new("Goodbye", "See you later!"),
        ]
    }

    #[test]
    fn test_hello_any_case_or_whitespace() {
        let bot = ChatBot::fit(&sample_records(), 1.0).unwrap();
        assert_eq!(bot.get_response("Hello"), "hi there");
        assert_eq!(bot.get_response("  HELLO \n"), "hi there");
        assert_eq!(bot.get_response("hello!"), "hi there");
    }

    #[test]
    fn test_matches_paraphrase() {
        let bot = ChatBot::fit(&sample_records(), 1.0).unwrap();
        assert_eq!(bot.get_response("what is the weather"), "I cannot see outside, sorry.");
        assert_eq!(bot.get_response("tell me another joke"), "Why did the crab never share? Because it was shellfish.");
    }

    #[test]
    fn test_answers_are_always_training_labels() {
        let records = sample_records();
        let bot = ChatBot::fit(&records, 1.0).unwrap();
        let inputs = [
            "",
            "?!",
            "zzz qqq xyzzy",
            "name weather joke goodbye hello",
            "Καλημέρα",
            "a b c",
        ];
        for input in inputs {
            let answer = bot.get_response(input);
            assert!(
                records.iter().any(|r| r.answer == answer),
                "{:?} produced unknown answer {:?}",
                input,
                answer
            );
        }
    }

    #[test]
    fn test_respond_blank_is_none() {
        let bot = ChatBot::fit(&sample_records(), 1.0).unwrap();
        assert_eq!(bot.respond(""), None);
        assert_eq!(bot.respond(" \t\n"), None);
        assert_eq!(bot.respond("hello"), Some("hi there"));
    }

    #[test]
    fn test_training_is_deterministic() {
        let model = ModelConfig {
            test_size: 0.34,
            ..ModelConfig::default()
        };
        let first = ChatBot::train(&sample_records(), &model).unwrap();
        let second = ChatBot::train(&sample_records(), &model).unwrap();
        assert_eq!(first.training_rows(), 3);
        assert_eq!(first.answers(), second.answers());
        for question in ["hello", "joke please", "what's your name", "bye"] {
            assert_eq!(first.get_response(question), second.get_response(question));
        }
    }

    #[test]
    fn test_empty_dataset() {
        let err = ChatBot::fit(&[], 1.0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QabotError>(),
            Some(QabotError::EmptyDataset)
        ));
    }
}
