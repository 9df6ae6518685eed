//! Dashboard HTTP server.
//!
//! The predictor and the dataset are loaded once at startup and shared
//! read-only by every request. Either may be absent, in which case the
//! endpoints that need it answer 404.

mod error;
mod handlers;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use crate::data::Dataset;
use crate::inference::ArrestPredictor;

pub use error::{AppError, AppResult};
pub use server::{create_router, serve};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Option<Arc<ArrestPredictor>>,
    pub dataset: Option<Arc<Dataset>>,
    /// Live `training_report.json`, read on each performance request
    pub report_path: PathBuf,
    /// Seed for the map sample of the spatial view
    pub seed: u64,
}

impl AppState {
    fn predictor(&self) -> AppResult<&ArrestPredictor> {
        self.predictor.as_deref().ok_or(AppError::ModelNotLoaded)
    }

    fn dataset(&self) -> AppResult<&Dataset> {
        self.dataset.as_deref().ok_or(AppError::DataNotLoaded)
    }
}
