use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::classifiers::{
    GradientBoostingParams, LogisticRegressionParams, RandomForestParams, XGBoostParams,
};
use crate::ui::types::choices::UIChoice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ModelChoiceKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ModelChoice {
    #[serde(rename = "xgboost")]
    #[strum_discriminants(strum(
        serialize = "xgboost",
        message = "XGBoost",
        detailed_message = "Second-order boosting with regularised leaves."
    ))]
    XGBoost(XGBoostParams),
    #[strum_discriminants(strum(
        message = "Random Forest",
        detailed_message = "Bagged Gini trees."
    ))]
    RandomForest(RandomForestParams),
    #[strum_discriminants(strum(
        message = "Logistic Regression",
        detailed_message = "L2-regularised linear model."
    ))]
    LogisticRegression(LogisticRegressionParams),
    #[strum_discriminants(strum(
        message = "Gradient Boosting",
        detailed_message = "Log-loss boosting of shallow regression trees."
    ))]
    GradientBoosting(GradientBoostingParams),
}

impl ModelChoice {
    pub fn with_defaults(kind: ModelChoiceKind) -> Self {
        match kind {
            ModelChoiceKind::XGBoost => ModelChoice::XGBoost(XGBoostParams::default()),
            ModelChoiceKind::RandomForest => ModelChoice::RandomForest(RandomForestParams::default()),
            ModelChoiceKind::LogisticRegression => {
                ModelChoice::LogisticRegression(LogisticRegressionParams::default())
            }
            ModelChoiceKind::GradientBoosting => {
                ModelChoice::GradientBoosting(GradientBoostingParams::default())
            }
        }
    }

    /// All four families with default hyper-parameters, in training order.
    pub fn all() -> Vec<Self> {
        use strum::IntoEnumIterator;
        ModelChoiceKind::iter().map(Self::with_defaults).collect()
    }
}

impl UIChoice for ModelChoice {
    type Kind = ModelChoiceKind;

    fn schema() -> Schema {
        schema_for!(ModelChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a model:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        let choice = serde_json::to_value(Self::with_defaults(kind)).unwrap_or_default();
        choice.get("params").cloned().unwrap_or_default()
    }
}
