//! # Hold-out Split
//!
//! File: cli/src/engine/split.rs
//!
//! Shuffles rows with a seeded RNG and cuts off a test portion of
//! `ceil(test_size * n)` rows. The same seed over the same rows always yields
//! the same partition, so a model trained on the training part is
//! reproducible across restarts.
//!
use crate::core::error::{QabotError, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

/// # Train/Test Split (`train_test_split`)
///
/// Returns `(train, test)`. A `test_size` of `0.0` keeps the original order and
/// puts every row in `train`.
///
/// ## Errors
///
/// `InvalidSplit` if `test_size` is outside `[0, 1)` or the split would leave
/// the training part empty.
pub fn train_test_split<T: Clone>(rows: &[T], test_size: f64, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(QabotError::InvalidSplit(test_size).into());
    }
    if test_size == 0.0 {
        return Ok((rows.to_vec(), Vec::new()));
    }

    let n_test = (test_size * rows.len() as f64).ceil() as usize;
    if n_test >= rows.len() {
        return Err(QabotError::InvalidSplit(test_size).into());
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let test = order[..n_test].iter().map(|&i| rows[i].clone()).collect();
    let train = order[n_test..].iter().map(|&i| rows[i].clone()).collect();
    debug!(
        "Split {} rows into {} train / {} test (seed {})",
        rows.len(),
        rows.len() - n_test,
        n_test,
        seed
    );
    Ok((train, test))
}
