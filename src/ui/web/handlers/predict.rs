//! Prediction handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use crate::core::records::IncidentQuery;
use crate::inference::risk::{self, RiskIndicator};
use crate::inference::Prediction;
use crate::ui::web::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub prediction: Prediction,
    /// Probability as a percentage
    pub confidence: f64,
    pub risk_color: &'static str,
    pub indicators: Vec<RiskIndicator>,
    pub recommendations: [&'static str; 4],
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<IncidentQuery>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(query) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let predictor = state.predictor()?;

    let prediction = predictor.predict(&query)?;
    let level = prediction.risk_level;
    Ok(Json(PredictResponse {
        confidence: prediction.probability * 100.0,
        risk_color: level.color(),
        indicators: risk::indicators(&query),
        recommendations: risk::recommendations(level),
        prediction,
    }))
}
