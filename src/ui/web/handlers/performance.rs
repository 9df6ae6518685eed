//! Model performance handler

use std::path::{Path, PathBuf};

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::warn;

use crate::classifiers::ModelKind;
use crate::evaluation::TrainingReport;
use crate::evaluation::reported::{REPORTED, ReportedMetrics};
use crate::ui::web::AppState;

#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub reported: ReportedMetrics,
    /// Loaded dataset size, or the reported figure when no data is loaded
    pub training_samples: String,
    pub loaded_model: Option<ModelKind>,
    pub training_report: Option<TrainingReport>,
}

pub async fn performance(State(state): State<AppState>) -> Json<PerformanceResponse> {
    let training_samples = state
        .dataset
        .as_ref()
        .map(|d| with_thousands(d.len()))
        .unwrap_or_else(|| REPORTED.training_samples.to_string());

    let training_report = read_report(state.report_path.clone()).await;

    Json(PerformanceResponse {
        reported: REPORTED,
        training_samples,
        loaded_model: state.predictor.as_ref().map(|p| p.kind()),
        training_report,
    })
}

/// The saved training report, read off the async workers.
async fn read_report(path: PathBuf) -> Option<TrainingReport> {
    match tokio::task::spawn_blocking(move || load_report(&path)).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Report reader stopped: {e}");
            None
        }
    }
}

fn load_report(path: &Path) -> Option<TrainingReport> {
    if !path.exists() {
        return None;
    }
    match TrainingReport::load(path) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            None
        }
    }
}

/// `446254` -> `446,254`
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
