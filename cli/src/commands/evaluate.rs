//! # qabot Evaluate Command
//!
//! File: cli/src/commands/evaluate.rs
//!
//! ## Overview
//!
//! Measures how well the pipeline generalises to questions it has not seen.
//! The dataset is shuffled with a fixed seed, `test_size` of the rows are held
//! out, the bot is fitted on the rest, and each held-out question counts as
//! correct when the bot returns its exact answer.
//!
//! Defaults mirror a conventional 80/20 split with seed 42. The same dataset,
//! fraction and seed always produce the same report.
//!
//! ```bash
//! qabot evaluate
//! qabot evaluate --dataset faq.csv --test-size 0.3 --seed 7
//! ```
//!
use crate::core::config;
use crate::core::error::{QabotError, Result};
use crate::engine::bot::ChatBot;
use crate::engine::dataset::{self, QaRecord};
use crate::engine::split::train_test_split;
use anyhow::anyhow;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Arguments for `qabot evaluate`.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// CSV file with `Question,Answer` columns.
    #[arg(long, short)]
    pub dataset: Option<PathBuf>,

    /// Fraction of rows to hold out, in (0, 1). Defaults to `model.test_size`
    /// from the configuration when set, otherwise 0.2.
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Shuffle seed. Defaults to `model.seed` from the configuration (42).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Outcome of a hold-out evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub train_rows: usize,
    pub test_rows: usize,
    pub correct: usize,
    pub seed: u64,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.test_rows == 0 {
            0.0
        } else {
            self.correct as f64 / self.test_rows as f64
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Held-out accuracy: {:.2}% ({}/{} correct, trained on {} rows, seed {})",
            self.accuracy() * 100.0,
            self.correct,
            self.test_rows,
            self.train_rows,
            self.seed
        )
    }
}

/// # Handle Evaluate Command (`handle_evaluate`)
pub async fn handle_evaluate(args: EvaluateArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let dataset_path = cfg.dataset_path(args.dataset.as_deref());
    let test_size = args.test_size.unwrap_or(if cfg.model.test_size > 0.0 {
        cfg.model.test_size
    } else {
        DEFAULT_TEST_SIZE
    });
    let seed = args.seed.unwrap_or(cfg.model.seed);

    let records = dataset::load_dataset(&dataset_path)?;
    let evaluation = evaluate_holdout(&records, test_size, seed, cfg.model.alpha)?;
    info!("{}", evaluation);
    println!("{}", evaluation);
    Ok(())
}

/// # Evaluate Hold-out (`evaluate_holdout`)
///
/// Splits `records`, fits on the training part and scores the held-out part.
///
/// ## Errors
///
/// `InvalidSplit` unless `test_size` is in `(0, 1)` and leaves at least one
/// training row; any training error from the pipeline.
pub fn evaluate_holdout(records: &[QaRecord], test_size: f64, seed: u64, alpha: f64) -> Result<Evaluation> {
    if test_size <= 0.0 {
        return Err(anyhow!(QabotError::InvalidSplit(test_size)));
    }
    let (train, test) = train_test_split(records, test_size, seed)?;
    let bot = ChatBot::fit(&train, alpha)?;

    let correct = test
        .iter()
        .filter(|record| {
            let predicted = bot.get_response(&record.question);
            debug!(
                "Held-out {:?}: expected {:?}, got {:?}",
                record.question, record.answer, predicted
            );
            predicted == record.answer
        })
        .count();

    Ok(Evaluation {
        train_rows: train.len(),
        test_rows: test.len(),
        correct,
        seed,
    })
}
