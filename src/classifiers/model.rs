use ndarray::{ArrayView1, ArrayView2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::classifiers::{
    Classifier, GradientBoosting, LogisticRegression, RandomForest, XGBoost,
};
use crate::error::Result;

/// The model families the training task can fit, in training order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[serde(rename = "xgboost")]
    #[strum(serialize = "XGBoost")]
    XGBoost,
    #[strum(serialize = "Random Forest")]
    RandomForest,
    #[strum(serialize = "Logistic Regression")]
    LogisticRegression,
    #[strum(serialize = "Gradient Boosting")]
    GradientBoosting,
}

impl ModelKind {
    pub fn display_name(self) -> &'static str {
        self.into()
    }
}

/// A fitted (or fit-ready) model of any supported family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum TrainedModel {
    #[serde(rename = "xgboost")]
    XGBoost(XGBoost),
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
    GradientBoosting(GradientBoosting),
}

impl TrainedModel {
    /// Unfitted model of `kind` with default hyper-parameters.
    pub fn with_defaults(kind: ModelKind) -> Self {
        match kind {
            ModelKind::XGBoost => TrainedModel::XGBoost(XGBoost::default()),
            ModelKind::RandomForest => TrainedModel::RandomForest(RandomForest::default()),
            ModelKind::LogisticRegression => {
                TrainedModel::LogisticRegression(LogisticRegression::default())
            }
            ModelKind::GradientBoosting => {
                TrainedModel::GradientBoosting(GradientBoosting::default())
            }
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            TrainedModel::XGBoost(_) => ModelKind::XGBoost,
            TrainedModel::RandomForest(_) => ModelKind::RandomForest,
            TrainedModel::LogisticRegression(_) => ModelKind::LogisticRegression,
            TrainedModel::GradientBoosting(_) => ModelKind::GradientBoosting,
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            TrainedModel::XGBoost(m) => m,
            TrainedModel::RandomForest(m) => m,
            TrainedModel::LogisticRegression(m) => m,
            TrainedModel::GradientBoosting(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Classifier {
        match self {
            TrainedModel::XGBoost(m) => m,
            TrainedModel::RandomForest(m) => m,
            TrainedModel::LogisticRegression(m) => m,
            TrainedModel::GradientBoosting(m) => m,
        }
    }
}

impl Classifier for TrainedModel {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
        self.inner_mut().fit(x, y)
    }

    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        self.inner().predict_proba(row)
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.inner().feature_importances()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::separable_set;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn display_names() {
        let names: Vec<&str> = ModelKind::iter().map(ModelKind::display_name).collect();
        assert_eq!(
            names,
            vec![
                "XGBoost",
                "Random Forest",
                "Logistic Regression",
                "Gradient Boosting"
            ]
        );
        assert_eq!(
            ModelKind::from_str("Random Forest").unwrap(),
            ModelKind::RandomForest
        );
        assert_eq!(
            serde_json::to_string(&ModelKind::XGBoost).unwrap(),
            "\"xgboost\""
        );
        assert_eq!(
            serde_json::to_string(&ModelKind::LogisticRegression).unwrap(),
            "\"logistic_regression\""
        );
    }

    #[test]
    fn every_kind_fits_and_round_trips() {
        let (x, y) = separable_set();
        for kind in ModelKind::iter() {
            let mut model = TrainedModel::with_defaults(kind);
            model.fit(x.view(), &y).unwrap();
            assert_eq!(model.kind(), kind);

            let json = serde_json::to_string(&model).unwrap();
            let back: TrainedModel = serde_json::from_str(&json).unwrap();
            let row = x.row(0);
            assert_eq!(
                back.predict_proba(row).unwrap(),
                model.predict_proba(row).unwrap(),
                "{kind}"
            );
        }
    }
}
