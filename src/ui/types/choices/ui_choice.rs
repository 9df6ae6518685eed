use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;

/// Adjacently tagged enum the wizard can offer as a menu: one entry per
/// variant, with the variant's `params` prompted from its JSON schema.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose a type:"
    }
    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Initial answers for the `params` of `kind`.
    fn default_params(kind: Self::Kind) -> Value;

    /// Extra params collected outside the schema-driven prompts, such as
    /// nested choices. Default: none.
    fn subprompts<D: PromptDriver>(_driver: &D, _kind: Self::Kind) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    /// Build the typed enum from kind + params.
    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        let v = json!({ "type": key, "params": params });
        serde_json::from_value(v).with_context(|| format!("invalid parameters for {key}"))
    }
}
