use crate::classifiers::tree::NodeStats;
use crate::classifiers::tree::split_criteria::SplitCriterion;

/// Squared-error reduction on residuals `g`, with Newton leaf values
/// `sum(g) / sum(h)`. Used by first-order gradient boosting where `g` is
/// the residual `y - p` and `h = p(1 - p)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarianceSplitCriterion;

impl VarianceSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    /// `sum(g)^2 / n`, the part of the node SSE a split can change.
    fn explained(stats: &NodeStats) -> f64 {
        if stats.count == 0 {
            0.0
        } else {
            stats.sum_g * stats.sum_g / stats.count as f64
        }
    }
}

impl SplitCriterion for VarianceSplitCriterion {
    fn merit_of_split(
        &self,
        pre: &NodeStats,
        left: &NodeStats,
        right: &NodeStats,
    ) -> Option<f64> {
        if left.count == 0 || right.count == 0 {
            return None;
        }
        Some(Self::explained(left) + Self::explained(right) - Self::explained(pre))
    }

    fn leaf_value(&self, stats: &NodeStats) -> f64 {
        if stats.sum_h.abs() < 1e-150 {
            0.0
        } else {
            stats.sum_g / stats.sum_h
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separating_residual_signs_scores_positive() {
        let c = VarianceSplitCriterion::new();
        let left = NodeStats {
            count: 2,
            sum_g: -1.0,
            sum_h: 0.5,
        };
        let right = NodeStats {
            count: 2,
            sum_g: 1.0,
            sum_h: 0.5,
        };
        let pre = left.merged(&right);
        let merit = c.merit_of_split(&pre, &left, &right).unwrap();
        assert!((merit - 1.0).abs() < 1e-12);
        assert!((c.leaf_value(&right) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_hessian_leaf_is_zero() {
        let c = VarianceSplitCriterion::new();
        let stats = NodeStats {
            count: 3,
            sum_g: 0.0,
            sum_h: 0.0,
        };
        assert_eq!(c.leaf_value(&stats), 0.0);
    }
}
