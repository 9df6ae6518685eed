use crate::classifiers::tree::NodeStats;

/// Scores a candidate binary split from the gradient statistics of the
/// parent and both children, and turns node statistics into a leaf value.
pub trait SplitCriterion {
    /// Merit of splitting `pre` into `left` and `right`. `None` rejects the
    /// split outright (e.g. a child below the minimum weight).
    fn merit_of_split(&self, pre: &NodeStats, left: &NodeStats, right: &NodeStats)
    -> Option<f64>;

    fn leaf_value(&self, stats: &NodeStats) -> f64;
}
