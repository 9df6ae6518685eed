use std::path::PathBuf;

use crate::tasks::{AnalysisTask, PredictTask, REPORT_FILE, SampleDataTask, ServeTask, TrainingTask};
use crate::ui::types::build::{BuildError, build_models};
use crate::ui::types::choices::TaskChoice;

/// A task ready to run.
pub enum Task {
    Train(TrainingTask),
    Predict(PredictTask),
    Serve(ServeTask),
    GenerateSample(SampleDataTask),
    Analyze(AnalysisTask),
}

pub fn build_task(choice: TaskChoice) -> Result<Task, BuildError> {
    match choice {
        TaskChoice::Train(p) => {
            let task = TrainingTask::new(
                p.data_path,
                p.model_dir,
                p.target,
                p.split.into(),
                build_models(p.models),
            )?
            .with_comparison_format(p.comparison_format);
            Ok(Task::Train(task))
        }
        TaskChoice::Predict(p) => {
            let task = match (p.query, p.query_path) {
                (Some(query), _) => PredictTask::new(p.artifact_path, query),
                (None, Some(path)) => PredictTask::from_query_file(p.artifact_path, path)?,
                (None, None) => {
                    return Err(BuildError::InvalidParameter(
                        "predict needs either `query` or `query_path`".into(),
                    ));
                }
            };
            Ok(Task::Predict(task))
        }
        TaskChoice::Serve(p) => {
            let model_dir = PathBuf::from(p.model_dir);
            let artifact = model_dir.join(format!("best_model_{}.json", p.target.key()));
            Ok(Task::Serve(ServeTask::new(
                artifact,
                p.data_path,
                model_dir.join(REPORT_FILE),
                p.port,
                p.seed,
            )))
        }
        TaskChoice::GenerateSample(p) => {
            let n = usize::try_from(p.n_samples)
                .map_err(|_| BuildError::InvalidParameter(format!("too many samples: {}", p.n_samples)))?;
            Ok(Task::GenerateSample(SampleDataTask::new(p.output, n, p.seed)?))
        }
        TaskChoice::Analyze(p) => Ok(Task::Analyze(AnalysisTask::new(p.data_path, p.views, p.seed))),
    }
}
