use std::cmp::Ordering;

use crate::classifiers::tree::NodeStats;

/// Best threshold found for one feature at one node.
#[derive(Debug, Clone, Copy)]
pub struct SplitSuggestion {
    pub feature: usize,
    /// Rows with `x[feature] <= threshold` go left.
    pub threshold: f64,
    pub merit: f64,
    pub left: NodeStats,
    pub right: NodeStats,
}

impl PartialEq for SplitSuggestion {
    fn eq(&self, other: &Self) -> bool {
        self.merit == other.merit
    }
}

impl PartialOrd for SplitSuggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.merit.partial_cmp(&other.merit)
    }
}
