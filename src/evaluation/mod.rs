mod confusion;
mod estimators;
mod evaluators;
mod measurement;
mod model_result;
mod preview;
pub mod reported;
mod report;
mod roc;

pub use confusion::ConfusionMatrix;
pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{BasicClassificationEvaluator, PerformanceEvaluator};
pub use measurement::Measurement;
pub use model_result::{ModelResult, TrainingReport, evaluate, select_best};
pub use preview::{ComparisonFormat, ComparisonRow, ModelComparison};
pub use report::{ClassMetrics, ClassificationReport};
pub use roc::{roc_auc, roc_curve};
