//! Dataset analysis handler

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::analysis::{AnalysisPanel, AnalysisView, DatasetOverview};
use crate::ui::web::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub overview: DatasetOverview,
    pub panel: AnalysisPanel,
}

pub async fn view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> AppResult<Json<AnalysisResponse>> {
    let view = AnalysisView::from_str(&view)
        .map_err(|_| AppError::NotFound(format!("Unknown analysis view: {view}")))?;
    let dataset = state.dataset()?;

    Ok(Json(AnalysisResponse {
        overview: DatasetOverview::from_dataset(dataset),
        panel: view.render(dataset, state.seed),
    }))
}
