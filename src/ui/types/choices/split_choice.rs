use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::config::{DEFAULT_RANDOM_STATE, DEFAULT_TEST_SIZE};
use crate::ui::types::choices::UIChoice;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StratifiedParams {
    #[schemars(
        title = "Test Size",
        description = "Fraction of rows held out for evaluation",
        range(min = 0.01, max = 0.99)
    )]
    pub test_size: f64,

    #[schemars(title = "Random State", description = "Seed of the shuffle")]
    pub seed: u64,
}

impl Default for StratifiedParams {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_RANDOM_STATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemporalParams {
    #[schemars(
        title = "Split Year",
        description = "Rows from this year on form the test set",
        range(min = 2002, max = 2023)
    )]
    pub split_year: i32,
}

impl Default for TemporalParams {
    fn default() -> Self {
        Self { split_year: 2022 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(SplitKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum SplitChoice {
    #[strum_discriminants(strum(
        message = "Stratified",
        detailed_message = "Random hold-out preserving the arrest ratio."
    ))]
    Stratified(StratifiedParams),
    #[strum_discriminants(strum(
        message = "Temporal",
        detailed_message = "Train on earlier years, test on later ones."
    ))]
    Temporal(TemporalParams),
}

impl Default for SplitChoice {
    fn default() -> Self {
        SplitChoice::Stratified(StratifiedParams::default())
    }
}

impl UIChoice for SplitChoice {
    type Kind = SplitKind;

    fn schema() -> Schema {
        schema_for!(SplitChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a train/test split:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            SplitKind::Stratified => {
                serde_json::to_value(StratifiedParams::default()).unwrap_or_default()
            }
            SplitKind::Temporal => serde_json::to_value(TemporalParams::default()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::specs_for_kind;

    #[test]
    fn default_is_the_configured_stratified_split() {
        let v = serde_json::to_value(SplitChoice::default()).unwrap();
        assert_eq!(v["type"], "stratified");
        assert_eq!(v["params"]["test_size"], 0.2);
        assert_eq!(v["params"]["seed"], 42);
    }

    #[test]
    fn temporal_fields_are_prompted() {
        let schema = <SplitChoice as UIChoice>::schema();
        let specs = specs_for_kind(&schema, "temporal").unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].title, "Split Year");
        assert_eq!(specs[0].min, Some(2002.0));
    }
}
