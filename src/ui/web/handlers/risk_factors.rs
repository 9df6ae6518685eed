//! Risk factor handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::classifiers::ModelKind;
use crate::inference::{FactorPoint, FeatureImportance, RiskFactor, explore_factor};
use crate::ui::web::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct ImportanceResponse {
    pub model: ModelKind,
    /// Least important first
    pub features: Vec<FeatureImportance>,
}

#[derive(Debug, Deserialize)]
pub struct ExploreRequest {
    /// Display name or snake_case key
    pub factor: String,
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub factor: RiskFactor,
    pub label: String,
    pub points: Vec<FactorPoint>,
}

pub async fn importance(State(state): State<AppState>) -> AppResult<Json<ImportanceResponse>> {
    let predictor = state.predictor()?;
    Ok(Json(ImportanceResponse {
        model: predictor.kind(),
        features: predictor.importance_ranking(),
    }))
}

pub async fn explore(
    State(state): State<AppState>,
    payload: Result<Json<ExploreRequest>, JsonRejection>,
) -> AppResult<Json<ExploreResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let factor = RiskFactor::parse(&request.factor)?;
    let predictor = state.predictor()?;

    let points = explore_factor(predictor, factor)?;
    Ok(Json(ExploreResponse {
        factor,
        label: factor.to_string(),
        points,
    }))
}
