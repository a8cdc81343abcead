use crate::dataset::{Dataset, Sample};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub const DEFAULT_TEST_FRACTION: f64 = 0.20;
pub const DEFAULT_SEED: u64 = 42;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SplitError {
    #[error("test fraction must be between 0 and 1 (exclusive), got {0}")]
    InvalidFraction(f64),
    #[error("split of {total} rows at {fraction} leaves {train} train and {test} test rows")]
    EmptyPartition { total: usize, fraction: f64, train: usize, test: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { test_fraction: DEFAULT_TEST_FRACTION, seed: DEFAULT_SEED }
    }
}

impl SplitConfig {
    /// round(fraction * total)
    pub fn test_size(&self, total: usize) -> usize {
        (self.test_fraction * total as f64).round() as usize
    }
}

/// Disjoint train/test subsets, each kept in shuffled order.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

pub fn train_test_split(dataset: &Dataset, config: &SplitConfig) -> Result<Split, SplitError> {
    let fraction = config.test_fraction;
    if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
        return Err(SplitError::InvalidFraction(fraction));
    }

    let total = dataset.len();
    let test = config.test_size(total);
    let train = total.saturating_sub(test);
    if test == 0 || train == 0 {
        return Err(SplitError::EmptyPartition { total, fraction, train, test });
    }

    let mut indices: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(test);
    let test_indices = indices;

    let samples = dataset.samples();
    let pick = |idx: &[usize]| idx.iter().map(|&i| samples[i]).collect::<Vec<_>>();

    tracing::debug!(
        "split {} rows into {} train / {} test (seed {})",
        total,
        train_indices.len(),
        test_indices.len(),
        config.seed
    );

    Ok(Split {
        train: pick(&train_indices),
        test: pick(&test_indices),
        train_indices,
        test_indices,
    })
}
