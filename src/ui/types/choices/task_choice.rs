use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::analysis::AnalysisView;
use crate::config::AppConfig;
use crate::core::records::IncidentQuery;
use crate::core::target::PredictionTarget;
use crate::data::SAMPLE_SIZE;
use crate::evaluation::ComparisonFormat;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::{prompt_choice, prompt_params, prompt_struct};
use crate::ui::types::choices::{ModelChoice, ModelChoiceKind, QueryForm, SplitChoice, UIChoice};

fn path_string(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Asks for a subset of every `T`, all checked at first.
fn ask_all_of<T, D>(driver: &D, title: &str, help: &str) -> anyhow::Result<Vec<T>>
where
    T: IntoEnumIterator + std::fmt::Display + std::str::FromStr,
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
    D: PromptDriver,
{
    let options: Vec<String> = T::iter().map(|t| t.to_string()).collect();
    driver
        .ask_multi_select(title, help, &options, &options)?
        .iter()
        .map(|s| s.parse::<T>().map_err(anyhow::Error::from))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrainParams {
    #[schemars(skip)]
    #[serde(default = "ModelChoice::all")]
    pub models: Vec<ModelChoice>,
    #[schemars(skip)]
    #[serde(default)]
    pub split: SplitChoice,

    #[schemars(title = "Data Path", description = "Cleaned crime CSV to train on")]
    pub data_path: String,

    #[schemars(
        title = "Model Directory",
        description = "Where the best model and training report are written"
    )]
    pub model_dir: String,

    #[serde(default)]
    #[schemars(title = "Target", description = "Label column to predict")]
    pub target: PredictionTarget,

    #[serde(default)]
    #[schemars(
        title = "Comparison Format",
        description = "File format of the model comparison table"
    )]
    pub comparison_format: ComparisonFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictParams {
    #[schemars(title = "Model Artifact", description = "Saved best_model_<target>.json")]
    pub artifact_path: String,

    /// JSON file with one incident, used when `query` is absent
    #[schemars(skip)]
    #[serde(default)]
    pub query_path: Option<String>,

    #[schemars(skip)]
    #[serde(default)]
    pub query: Option<IncidentQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ServeParams {
    #[schemars(title = "Data Path", description = "Dataset behind the analysis views")]
    pub data_path: String,

    #[schemars(title = "Model Directory", description = "Directory holding trained artifacts")]
    pub model_dir: String,

    #[serde(default)]
    #[schemars(title = "Target", description = "Which trained model to serve")]
    pub target: PredictionTarget,

    #[schemars(title = "Port", range(min = 1, max = 65535))]
    pub port: u16,

    #[schemars(title = "Random State", description = "Seed of the map sample")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleParams {
    #[schemars(title = "Output Path", description = "CSV file to create")]
    pub output: String,

    #[schemars(title = "Samples", description = "Number of records", range(min = 1))]
    pub n_samples: u64,

    #[schemars(title = "Random State")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    #[schemars(title = "Data Path", description = "Crime CSV to describe")]
    pub data_path: String,

    /// Empty means every view
    #[schemars(skip)]
    #[serde(default)]
    pub views: Vec<AnalysisView>,

    #[schemars(title = "Random State", description = "Seed of the map sample")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Train",
        detailed_message = "Fit the models, compare them and save the best by AUC."
    ))]
    Train(TrainParams),
    #[strum_discriminants(strum(
        message = "Predict",
        detailed_message = "Score one incident with a saved model."
    ))]
    Predict(PredictParams),
    #[strum_discriminants(strum(
        message = "Serve",
        detailed_message = "Start the web dashboard."
    ))]
    Serve(ServeParams),
    #[strum_discriminants(strum(
        message = "Generate Sample Data",
        detailed_message = "Write a synthetic crime CSV."
    ))]
    GenerateSample(SampleParams),
    #[strum_discriminants(strum(
        message = "Analyze Data",
        detailed_message = "Print the dataset overview and distributions."
    ))]
    Analyze(AnalyzeParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        let config = AppConfig::from_env();
        let target = PredictionTarget::default();
        match kind {
            TaskKind::Train => json!({
                "data_path": path_string(&config.data_path),
                "model_dir": path_string(&config.model_dir),
                "target": target,
                "comparison_format": ComparisonFormat::default(),
            }),
            TaskKind::Predict => json!({
                "artifact_path": path_string(&config.model_path(target.key())),
            }),
            TaskKind::Serve => json!({
                "data_path": path_string(&config.data_path),
                "model_dir": path_string(&config.model_dir),
                "target": target,
                "port": config.port,
                "seed": config.random_state,
            }),
            TaskKind::GenerateSample => json!({
                "output": path_string(&config.data_path),
                "n_samples": SAMPLE_SIZE,
                "seed": config.random_state,
            }),
            TaskKind::Analyze => json!({
                "data_path": path_string(&config.data_path),
                "seed": config.random_state,
            }),
        }
    }

    fn subprompts<D: PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        let mut m = Map::new();
        match kind {
            TaskKind::Train => {
                let kinds: Vec<ModelChoiceKind> =
                    ask_all_of(driver, "Models to train:", "Space toggles a model")?;

                let customize = driver.ask_bool(
                    "Customize hyper-parameters?",
                    "No keeps the defaults of every model",
                    false,
                )?;
                let mut models = Vec::with_capacity(kinds.len());
                for kind in kinds {
                    models.push(if customize {
                        prompt_params::<ModelChoice, _>(driver, kind)?
                    } else {
                        ModelChoice::with_defaults(kind)
                    });
                }
                let split = prompt_choice::<SplitChoice, _>(driver)?;

                m.insert("models".into(), serde_json::to_value(models)?);
                m.insert("split".into(), serde_json::to_value(split)?);
            }
            TaskKind::Predict => {
                let form: QueryForm = prompt_struct(driver, &QueryForm::default())?;
                m.insert("query".into(), serde_json::to_value(IncidentQuery::from(form))?);
            }
            TaskKind::Analyze => {
                let views: Vec<AnalysisView> =
                    ask_all_of(driver, "Views to render:", "Space toggles a view")?;
                m.insert("views".into(), serde_json::to_value(views)?);
            }
            TaskKind::Serve | TaskKind::GenerateSample => return Ok(None),
        }
        Ok(Some(m))
    }
}
