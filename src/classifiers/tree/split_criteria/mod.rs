mod gini_split_criterion;
mod second_order_split_criterion;
mod split_criterion;
mod variance_split_criterion;

pub use gini_split_criterion::GiniSplitCriterion;
pub use second_order_split_criterion::SecondOrderSplitCriterion;
pub use split_criterion::SplitCriterion;
pub use variance_split_criterion::VarianceSplitCriterion;
