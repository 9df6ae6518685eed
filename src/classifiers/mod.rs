mod boosting;
pub mod classifier;
mod gradient_boosting;
mod logistic_regression;
mod model;
mod random_forest;
pub mod tree;
mod xgboost;

pub use boosting::BoostedTrees;
pub use classifier::Classifier;
pub use gradient_boosting::{GradientBoosting, GradientBoostingParams};
pub use logistic_regression::{LogisticRegression, LogisticRegressionParams};
pub use model::{ModelKind, TrainedModel};
pub use random_forest::{RandomForest, RandomForestParams};
pub use xgboost::{XGBoost, XGBoostParams};
