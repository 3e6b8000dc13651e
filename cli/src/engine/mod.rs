//! # qabot Question-Answering Engine
//!
//! File: cli/src/engine/mod.rs
//!
//! ## Overview
//!
//! This module aggregates everything needed to turn a CSV of question/answer
//! pairs into a function from free text to a stored answer:
//!
//! - **`dataset`**: reads `Question,Answer` rows into `QaRecord`s.
//! - **`preprocess`**: lowercases and word-tokenizes text into a space-joined string.
//! - **`vectorizer`**: TF-IDF features over the training questions.
//! - **`classifier`**: multinomial naive Bayes over those features.
//! - **`pipeline`**: the vectorizer and classifier fitted and invoked as one unit.
//! - **`split`**: seeded hold-out split used for evaluation.
//! - **`bot`**: `ChatBot`, the trained model plus `get_response`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::engine::bot::ChatBot;
//!
//! let bot = ChatBot::from_dataset(&path, &cfg.model)?;
//! let answer = bot.get_response("Hello there!");
//! ```
//!
//! The model is trained once, synchronously, and is immutable afterwards, so a
//! single `ChatBot` can be shared read-only between request handlers.
//!

/// The trained chatbot and its inference function.
pub mod bot;
/// Multinomial naive-Bayes classifier.
pub mod classifier;
/// CSV dataset loading.
pub mod dataset;
/// Vectorizer + classifier pipeline.
pub mod pipeline;
/// Lowercasing word tokenizer.
pub mod preprocess;
/// Seeded train/test split.
pub mod split;
/// TF-IDF feature extraction.
pub mod vectorizer;
