use serde::{Deserialize, Serialize};

use crate::classifiers::tree::NodeStats;
use crate::classifiers::tree::split_criteria::SplitCriterion;

/// Regularised second-order gain:
/// `0.5 * (G_L²/(H_L+λ) + G_R²/(H_R+λ) - G²/(H+λ)) - γ`,
/// with leaf weights `G / (H + λ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondOrderSplitCriterion {
    pub lambda: f64,
    pub gamma: f64,
    pub min_child_weight: f64,
}

impl Default for SecondOrderSplitCriterion {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
        }
    }
}

impl SecondOrderSplitCriterion {
    fn score(&self, stats: &NodeStats) -> f64 {
        stats.sum_g * stats.sum_g / (stats.sum_h + self.lambda)
    }
}

impl SplitCriterion for SecondOrderSplitCriterion {
    fn merit_of_split(
        &self,
        pre: &NodeStats,
        left: &NodeStats,
        right: &NodeStats,
    ) -> Option<f64> {
        if left.sum_h < self.min_child_weight || right.sum_h < self.min_child_weight {
            return None;
        }
        Some(0.5 * (self.score(left) + self.score(right) - self.score(pre)) - self.gamma)
    }

    fn leaf_value(&self, stats: &NodeStats) -> f64 {
        stats.sum_g / (stats.sum_h + self.lambda)
    }
}
