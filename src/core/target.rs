use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::{ARREST_TARGET_COLUMN, VIOLENT_CRIME_TARGET_COLUMN};

/// Binary label a model is trained to predict.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PredictionTarget {
    #[default]
    Arrest,
    ViolentCrime,
}

impl PredictionTarget {
    /// Dataset column holding the 0/1 label.
    pub fn column(self) -> &'static str {
        match self {
            PredictionTarget::Arrest => ARREST_TARGET_COLUMN,
            PredictionTarget::ViolentCrime => VIOLENT_CRIME_TARGET_COLUMN,
        }
    }

    /// Short key used in artifact file names.
    pub fn key(self) -> &'static str {
        self.into()
    }
}
