//! Loading trained artifacts and scoring incident queries.

mod artifact;
mod predictor;
pub mod risk;

pub use artifact::ModelArtifact;
pub use predictor::{ArrestPredictor, FeatureImportance, Prediction};
pub use risk::{FactorPoint, RiskFactor, RiskIndicator, RiskLevel, explore_factor};
