use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::records::IncidentQuery;
use crate::error::Result;
use crate::inference::{ArrestPredictor, Prediction};

/// Scores one incident against a saved model artifact.
pub struct PredictTask {
    artifact_path: PathBuf,
    query: IncidentQuery,
}

impl PredictTask {
    pub fn new<P: Into<PathBuf>>(artifact_path: P, query: IncidentQuery) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            query,
        }
    }

    /// Reads the query from a JSON object with dataset or snake_case keys.
    pub fn from_query_file<P: Into<PathBuf>, Q: AsRef<Path>>(
        artifact_path: P,
        query_path: Q,
    ) -> Result<Self> {
        let text = fs::read_to_string(query_path)?;
        let query: IncidentQuery = serde_json::from_str(&text)?;
        Ok(Self::new(artifact_path, query))
    }

    pub fn query(&self) -> &IncidentQuery {
        &self.query
    }

    pub fn run(self) -> Result<Prediction> {
        let predictor = ArrestPredictor::load(&self.artifact_path)?;
        let prediction = predictor.predict(&self.query)?;
        info!(
            "{} predicts {:.1}% arrest probability ({} risk)",
            predictor.kind(),
            prediction.probability * 100.0,
            prediction.risk_level
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FEATURE_COUNT;
    use crate::testing::fixtures::trained_artifact;
    use tempfile::tempdir;

    #[test]
    fn predicts_from_a_query_file() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("best_model_arrest.json");
        trained_artifact().save(&artifact).unwrap();

        let query = dir.path().join("query.json");
        fs::write(
            &query,
            r#"{"Hour": 23, "TimeOfDay": "Night", "Location_Description_Clean": "ALLEY",
                "latitude": 41.88, "longitude": -87.63, "district": 1, "ward": 42,
                "beat": 111, "community_area": 32, "day_of_week": 5, "month": 7,
                "year": 2021, "season": "Summer"}"#,
        )
        .unwrap();

        let task = PredictTask::from_query_file(&artifact, &query).unwrap();
        assert_eq!(task.query().hour, Some(23.0));
        let prediction = task.run().unwrap();
        assert!((0.0..=1.0).contains(&prediction.probability));
        assert_eq!(prediction.features_used.len(), FEATURE_COUNT);
    }

    #[test]
    fn missing_artifact_fails() {
        let dir = tempdir().unwrap();
        let task = PredictTask::new(dir.path().join("nope.json"), IncidentQuery::baseline());
        assert!(task.run().is_err());
    }
}
