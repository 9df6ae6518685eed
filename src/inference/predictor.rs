use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::classifiers::{Classifier, ModelKind};
use crate::config::FEATURE_COUNT;
use crate::core::feature_header::CRIME_HEADER;
use crate::core::records::IncidentQuery;
use crate::error::{Error, Result};
use crate::inference::{ModelArtifact, RiskLevel};

/// Outcome of scoring one incident.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub prediction: u8,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub features_used: Vec<String>,
    /// Encoded and scaled inputs, in `features_used` order
    pub feature_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Loaded artifact ready to score queries. Read-only after construction.
#[derive(Debug, Clone)]
pub struct ArrestPredictor {
    artifact: ModelArtifact,
}

impl ArrestPredictor {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let artifact = ModelArtifact::load(path)?;
        info!(
            "Loaded {} model for {} from {}",
            artifact.kind,
            artifact.target,
            path.display()
        );
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.feature_names.len() != FEATURE_COUNT {
            return Err(Error::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: artifact.feature_names.len(),
            });
        }
        let scaled_width = artifact.pipeline.scaler().n_features();
        if scaled_width != FEATURE_COUNT {
            return Err(Error::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: scaled_width,
            });
        }
        Ok(Self { artifact })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn kind(&self) -> ModelKind {
        self.artifact.kind
    }

    pub fn predict(&self, query: &IncidentQuery) -> Result<Prediction> {
        let encoded = self.artifact.pipeline.encode_query(query);
        let scaled = self.artifact.pipeline.scale(encoded.view())?;
        let overflowed = scaled.iter().position(|v| !v.is_finite());
        if let Some(i) = overflowed {
            return Err(Error::InvalidParameter(format!(
                "{} is out of range for this model",
                self.artifact.feature_names[i]
            )));
        }
        let probability = self.artifact.model.predict_proba(scaled.view())?;
        if !probability.is_finite() {
            return Err(Error::InvalidParameter(
                "query produced an undefined probability".into(),
            ));
        }
        let probability = probability.clamp(0.0, 1.0);
        debug!("Scored query with probability {probability:.4}");

        Ok(Prediction {
            prediction: u8::from(probability > 0.5),
            probability,
            risk_level: RiskLevel::from_probability(probability),
            features_used: self.artifact.feature_names.clone(),
            feature_values: scaled.to_vec(),
        })
    }

    /// Model importances labelled with chart names, least important first.
    /// Empty when the model exposes none.
    pub fn importance_ranking(&self) -> Vec<FeatureImportance> {
        let Some(importances) = self.artifact.model.feature_importances() else {
            return Vec::new();
        };
        let mut ranking: Vec<FeatureImportance> = CRIME_HEADER
            .display_names()
            .into_iter()
            .zip(importances)
            .map(|(feature, importance)| FeatureImportance {
                feature,
                importance,
            })
            .collect();
        ranking.sort_by(|a, b| a.importance.total_cmp(&b.importance));
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{trained_artifact, trained_predictor};
    use tempfile::tempdir;

    #[test]
    fn prediction_has_probability_and_label() {
        let predictor = trained_predictor();
        let p = predictor.predict(&IncidentQuery::baseline()).unwrap();

        assert!((0.0..=1.0).contains(&p.probability));
        assert_eq!(p.risk_level, RiskLevel::from_probability(p.probability));
        assert_eq!(p.prediction, u8::from(p.probability > 0.5));
        assert_eq!(p.features_used.len(), FEATURE_COUNT);
        assert_eq!(p.feature_values.len(), FEATURE_COUNT);
        assert_eq!(p.features_used[10], "Location_Description_Clean");
    }

    #[test]
    fn extreme_coordinates_are_rejected() {
        let predictor = trained_predictor();
        let query = IncidentQuery {
            latitude: Some(1e308),
            longitude: Some(1e308),
            beat: Some(1e308),
            ..IncidentQuery::baseline()
        };
        let err = predictor.predict(&query).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(msg) if msg.contains("Latitude")));
    }

    #[test]
    fn learned_rule_shows_in_predictions() {
        let predictor = trained_predictor();
        let night = IncidentQuery {
            hour: Some(2.0),
            time_of_day: Some("Night".into()),
            ..IncidentQuery::baseline()
        };
        let noon = IncidentQuery::baseline();
        let p_night = predictor.predict(&night).unwrap().probability;
        let p_noon = predictor.predict(&noon).unwrap().probability;
        assert!(p_night > p_noon);
    }

    #[test]
    fn missing_features_still_predict() {
        let predictor = trained_predictor();
        let p = predictor.predict(&IncidentQuery::default()).unwrap();
        assert!((0.0..=1.0).contains(&p.probability));
    }

    #[test]
    fn ranking_is_ascending_with_display_names() {
        let ranking = trained_predictor().importance_ranking();
        assert_eq!(ranking.len(), FEATURE_COUNT);
        assert!(ranking.windows(2).all(|w| w[0].importance <= w[1].importance));
        assert!(ranking.iter().any(|f| f.feature == "Time of Day"));
        assert!(ranking.iter().all(|f| f.feature != "TimeOfDay"));
    }

    #[test]
    fn load_round_trips_and_validates_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best_model_arrest.json");
        let artifact = trained_artifact();
        artifact.save(&path).unwrap();

        let predictor = ArrestPredictor::load(&path).unwrap();
        assert_eq!(predictor.artifact(), &artifact);

        let mut broken = artifact;
        broken.feature_names.pop();
        assert!(matches!(
            ArrestPredictor::from_artifact(broken),
            Err(Error::DimensionMismatch { expected: 13, found: 12 })
        ));
        assert!(ArrestPredictor::load(dir.path().join("missing.json")).is_err());
    }
}
