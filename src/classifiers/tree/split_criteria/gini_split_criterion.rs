use crate::classifiers::tree::NodeStats;
use crate::classifiers::tree::split_criteria::SplitCriterion;

/// Gini impurity decrease for 0/1 targets.
///
/// Expects `g = label` and `h = 1` per sample, so `sum_g / sum_h` is the
/// positive fraction of the node.
#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_gini(&self, stats: &NodeStats) -> f64 {
        if stats.sum_h <= 0.0 {
            return 0.0;
        }
        let p = stats.sum_g / stats.sum_h;
        1.0 - p * p - (1.0 - p) * (1.0 - p)
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn merit_of_split(
        &self,
        pre: &NodeStats,
        left: &NodeStats,
        right: &NodeStats,
    ) -> Option<f64> {
        if left.count == 0 || right.count == 0 {
            return None;
        }
        Some(
            pre.sum_h * self.compute_gini(pre)
                - left.sum_h * self.compute_gini(left)
                - right.sum_h * self.compute_gini(right),
        )
    }

    fn leaf_value(&self, stats: &NodeStats) -> f64 {
        if stats.sum_h > 0.0 {
            stats.sum_g / stats.sum_h
        } else {
            0.0
        }
    }
}
