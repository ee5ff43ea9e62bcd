//! Train/test partitioning
//!
//! The test subset takes `round(test_size * N)` rows; the training subset
//! takes the rest. Without a seed every call draws a fresh permutation, so
//! repeated runs over the same file can report different numbers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Dataset;
use crate::errors::{Result, ShoppingError};

/// Disjoint training and evaluation subsets.
#[derive(Clone, Debug)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Number of rows that go to the test subset.
pub fn test_count(total: usize, test_size: f64) -> Result<usize> {
    if total == 0 {
        return Err(ShoppingError::EmptyDataset);
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ShoppingError::InvalidTestFraction(test_size));
    }
    Ok(((total as f64) * test_size).round() as usize)
}

/// Randomly partition `dataset`, holding out `test_size` of it for testing.
///
/// A `seed` pins the permutation; `None` draws from the thread RNG.
pub fn train_test_split(
    dataset: &Dataset,
    test_size: f64,
    seed: Option<u64>,
) -> Result<TrainTestSplit> {
    // Validate before spending a shuffle on it
    test_count(dataset.len(), test_size)?;

    let mut order: Vec<usize> = (0..dataset.len()).collect();
    match seed {
        Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => order.shuffle(&mut rand::thread_rng()),
    }

    split_with_order(dataset, &order, test_size)
}

/// Partition `dataset` following an explicit permutation of its row indices.
/// The leading `round(test_size * N)` entries of `order` form the test subset.
pub fn split_with_order(
    dataset: &Dataset,
    order: &[usize],
    test_size: f64,
) -> Result<TrainTestSplit> {
    let total = dataset.len();
    let n_test = test_count(total, test_size)?;

    if !is_permutation(order, total) {
        return Err(ShoppingError::InvalidSplitOrder { expected: total });
    }

    let (test_idx, train_idx) = order.split_at(n_test);
    let split = TrainTestSplit {
        train: dataset.subset(train_idx),
        test: dataset.subset(test_idx),
    };

    tracing::debug!(
        "Dataset split: {} training, {} test",
        split.train.len(),
        split.test.len(),
    );

    Ok(split)
}

fn is_permutation(order: &[usize], total: usize) -> bool {
    if order.len() != total {
        return false;
    }
    let mut seen = vec![false; total];
    for &idx in order {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
