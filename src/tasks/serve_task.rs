use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::data::load_records;
use crate::error::Result;
use crate::inference::ArrestPredictor;
use crate::ui::web::{self, AppState};

/// Starts the dashboard server and blocks until it stops.
pub struct ServeTask {
    artifact_path: PathBuf,
    data_path: PathBuf,
    report_path: PathBuf,
    port: u16,
    seed: u64,
}

impl ServeTask {
    pub fn new<P, Q, R>(artifact_path: P, data_path: Q, report_path: R, port: u16, seed: u64) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
        R: Into<PathBuf>,
    {
        Self {
            artifact_path: artifact_path.into(),
            data_path: data_path.into(),
            report_path: report_path.into(),
            port,
            seed,
        }
    }

    /// Shared state for the router. A missing model or dataset only disables
    /// the endpoints that need it.
    pub fn load_state(&self) -> AppState {
        let predictor = match ArrestPredictor::load(&self.artifact_path) {
            Ok(p) => Some(Arc::new(p)),
            Err(e) => {
                warn!(
                    "Model not loaded from {}: {e}. Train a model first.",
                    self.artifact_path.display()
                );
                None
            }
        };
        let dataset = match load_records(&self.data_path) {
            Ok(d) => Some(Arc::new(d)),
            Err(e) => {
                warn!("Dataset not loaded from {}: {e}", self.data_path.display());
                None
            }
        };
        AppState {
            predictor,
            dataset,
            report_path: self.report_path.clone(),
            seed: self.seed,
        }
    }

    pub fn run(self) -> Result<()> {
        let state = self.load_state();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        info!("Starting dashboard on port {}", self.port);
        runtime.block_on(web::serve(state, self.port))
    }
}
