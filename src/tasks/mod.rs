mod analysis_task;
mod predict_task;
mod sample_data_task;
mod serve_task;
mod training_task;

pub use analysis_task::{AnalysisSummary, AnalysisTask};
pub use predict_task::PredictTask;
pub use sample_data_task::SampleDataTask;
pub use serve_task::ServeTask;
pub use training_task::{REPORT_FILE, TrainingOutcome, TrainingTask};
