//! Train/test partitioning of labelled rows.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Row indices of each partition, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// How the training task partitions rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
pub enum SplitStrategy {
    /// Class-preserving random hold-out
    Stratified { test_size: f64, seed: u64 },
    /// Rows before `split_year` train, the rest test
    Temporal { split_year: i32 },
}

impl Default for SplitStrategy {
    fn default() -> Self {
        SplitStrategy::Stratified {
            test_size: crate::config::DEFAULT_TEST_SIZE,
            seed: crate::config::DEFAULT_RANDOM_STATE,
        }
    }
}

impl SplitStrategy {
    pub fn apply(&self, labels: &[u8], years: &[f64]) -> Result<Split> {
        match *self {
            SplitStrategy::Stratified { test_size, seed } => stratified(labels, test_size, seed),
            SplitStrategy::Temporal { split_year } => temporal(years, split_year),
        }
    }
}

/// Random hold-out preserving the class ratio.
///
/// Each class is shuffled with one seeded generator (class 0 first) and
/// contributes `round(n_c * test_fraction)` rows to the test side.
pub fn stratified(labels: &[u8], test_fraction: f64, seed: u64) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "test fraction must lie in (0, 1), got {test_fraction}"
        )));
    }
    if labels.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = Split::default();

    for class in [0u8, 1u8] {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        members.shuffle(&mut rng);

        let n_test = (members.len() as f64 * test_fraction).round() as usize;
        let (test, train) = members.split_at(n_test.min(members.len()));
        split.test.extend_from_slice(test);
        split.train.extend_from_slice(train);
    }

    split.train.sort_unstable();
    split.test.sort_unstable();
    Ok(split)
}

/// Chronological hold-out: `year < split_year` trains, everything else tests.
pub fn temporal(years: &[f64], split_year: i32) -> Result<Split> {
    let mut split = Split::default();
    for (i, &year) in years.iter().enumerate() {
        if year < f64::from(split_year) {
            split.train.push(i);
        } else {
            split.test.push(i);
        }
    }
    if split.train.is_empty() || split.test.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "split year {split_year} leaves an empty partition"
        )));
    }
    Ok(split)
}
