use crate::classifiers::{GradientBoosting, LogisticRegression, RandomForest, TrainedModel, XGBoost};
use crate::ui::types::choices::ModelChoice;

impl From<ModelChoice> for TrainedModel {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::XGBoost(p) => TrainedModel::XGBoost(XGBoost::new(p)),
            ModelChoice::RandomForest(p) => TrainedModel::RandomForest(RandomForest::new(p)),
            ModelChoice::LogisticRegression(p) => {
                TrainedModel::LogisticRegression(LogisticRegression::new(p))
            }
            ModelChoice::GradientBoosting(p) => {
                TrainedModel::GradientBoosting(GradientBoosting::new(p))
            }
        }
    }
}

pub fn build_models(choices: Vec<ModelChoice>) -> Vec<TrainedModel> {
    choices.into_iter().map(TrainedModel::from).collect()
}
