use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifiers::{ModelKind, TrainedModel};
use crate::core::target::PredictionTarget;
use crate::error::Result;
use crate::evaluation::ModelResult;
use crate::features::FeaturePipeline;

/// A fitted model bundled with the preprocessing it was trained behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub target: PredictionTarget,
    pub kind: ModelKind,
    pub model: TrainedModel,
    pub pipeline: FeaturePipeline,
    pub feature_names: Vec<String>,
    /// Hold-out scores of `model`, absent for artifacts built outside training
    pub metrics: Option<ModelResult>,
    pub trained_at: DateTime<Utc>,
}

impl ModelArtifact {
    pub fn new(
        target: PredictionTarget,
        model: TrainedModel,
        pipeline: FeaturePipeline,
        metrics: Option<ModelResult>,
    ) -> Self {
        Self {
            target,
            kind: model.kind(),
            feature_names: pipeline.feature_names(),
            model,
            pipeline,
            metrics,
            trained_at: Utc::now(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(self)?)?;
        info!("Saved {} model to {}", self.kind, path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
