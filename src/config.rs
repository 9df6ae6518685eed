//! Application configuration.
//!
//! Feature layout and target columns are fixed constants; paths and tuning
//! knobs come from the environment (optionally through a `.env` file).

use std::env;
use std::path::PathBuf;

pub const APP_TITLE: &str = "Chicago Crime Prediction Dashboard";
pub const APP_DESCRIPTION: &str = "Predict crime patterns and probabilities in Chicago";

pub const NUMERICAL_FEATURES: [&str; 10] = [
    "Latitude",
    "Longitude",
    "Beat",
    "District",
    "Ward",
    "Community Area",
    "Hour",
    "DayOfWeek",
    "Month",
    "Year",
];

pub const CATEGORICAL_FEATURES: [&str; 3] = ["Location_Description_Clean", "TimeOfDay", "Season"];

pub const FEATURE_COUNT: usize = NUMERICAL_FEATURES.len() + CATEGORICAL_FEATURES.len();

pub const ARREST_TARGET_COLUMN: &str = "Arrest_Target";
pub const VIOLENT_CRIME_TARGET_COLUMN: &str = "Violent_Crime";

pub const DEFAULT_DATA_PATH: &str = "data/cleaned_crime_data.csv";
pub const DEFAULT_MODEL_DIR: &str = "models/";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_RANDOM_STATE: u64 = 42;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Runtime configuration shared by the CLI and the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// CSV dataset used for training and analysis
    pub data_path: PathBuf,

    /// Directory holding model artifacts and training reports
    pub model_dir: PathBuf,

    /// Dashboard port
    pub port: u16,

    /// Seed for splits, bootstraps and sampling
    pub random_state: u64,

    /// Fraction of rows held out for evaluation
    pub test_size: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            port: DEFAULT_PORT,
            random_state: DEFAULT_RANDOM_STATE,
            test_size: DEFAULT_TEST_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_path: lookup("CRIMECAST_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),

            model_dir: lookup("CRIMECAST_MODELS")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            random_state: lookup("RANDOM_STATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.random_state),

            test_size: lookup("TEST_SIZE")
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|t| *t > 0.0 && *t < 1.0)
                .unwrap_or(defaults.test_size),
        }
    }

    /// Artifact path for the best model of a target, e.g. `models/best_model_arrest.json`.
    pub fn model_path(&self, target_key: &str) -> PathBuf {
        self.model_dir.join(format!("best_model_{target_key}.json"))
    }

    pub fn report_path(&self) -> PathBuf {
        self.model_dir.join("training_report.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.port, 8501);
        assert_eq!(cfg.random_state, 42);
        assert!((cfg.test_size - 0.2).abs() < 1e-12);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("CRIMECAST_DATA", "/tmp/crimes.csv"),
            ("CRIMECAST_MODELS", "/tmp/models"),
            ("PORT", "9000"),
            ("RANDOM_STATE", "7"),
            ("TEST_SIZE", "0.25"),
        ]));
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/crimes.csv"));
        assert_eq!(cfg.model_dir, PathBuf::from("/tmp/models"));
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.random_state, 7);
        assert!((cfg.test_size - 0.25).abs() < 1e-12);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PORT", "http"), ("TEST_SIZE", "1.5")]));
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert!((cfg.test_size - DEFAULT_TEST_SIZE).abs() < 1e-12);
    }

    #[test]
    fn artifact_paths_follow_target_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.model_path("arrest"),
            PathBuf::from("models/best_model_arrest.json")
        );
        assert_eq!(cfg.report_path(), PathBuf::from("models/training_report.json"));
    }
}
