mod comparison;

pub use comparison::{ComparisonFormat, ComparisonRow, ModelComparison};
