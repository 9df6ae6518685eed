use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::classifiers::{Classifier, TrainedModel};
use crate::core::target::PredictionTarget;
use crate::data::load_records;
use crate::data::split::SplitStrategy;
use crate::error::{Error, Result};
use crate::evaluation::{
    ComparisonFormat, ModelComparison, ModelResult, TrainingReport, evaluate, select_best,
};
use crate::features::FeaturePipeline;
use crate::inference::ModelArtifact;

pub const REPORT_FILE: &str = "training_report.json";
/// File name of the comparison table, before its format extension.
const COMPARISON_STEM: &str = "model_comparison";

/// Fits every configured model on one split and keeps the best by AUC.
pub struct TrainingTask {
    data_path: PathBuf,
    model_dir: PathBuf,
    target: PredictionTarget,
    split: SplitStrategy,
    models: Vec<TrainedModel>,
    comparison_format: ComparisonFormat,

    progress_tx: Option<Sender<ModelResult>>,
}

/// Where a finished run left its files.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub report: TrainingReport,
    pub artifact_path: PathBuf,
    pub report_path: PathBuf,
    pub comparison_path: PathBuf,
}

impl TrainingTask {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        data_path: P,
        model_dir: Q,
        target: PredictionTarget,
        split: SplitStrategy,
        models: Vec<TrainedModel>,
    ) -> Result<Self> {
        if models.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one model must be selected".into(),
            ));
        }
        if let SplitStrategy::Stratified { test_size, .. } = split {
            if !(test_size > 0.0 && test_size < 1.0) {
                return Err(Error::InvalidParameter(format!(
                    "test_size must be in (0, 1), got {test_size}"
                )));
            }
        }
        Ok(Self {
            data_path: data_path.into(),
            model_dir: model_dir.into(),
            target,
            split,
            models,
            comparison_format: ComparisonFormat::default(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<ModelResult>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_comparison_format(mut self, format: ComparisonFormat) -> Self {
        self.comparison_format = format;
        self
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn run(self) -> Result<TrainingOutcome> {
        let dataset = load_records(&self.data_path)?;
        let rows = dataset.labelled(self.target)?;
        let split = self.split.apply(&rows.labels, &rows.years())?;
        let train = rows.select(&split.train);
        let test = rows.select(&split.test);
        info!(
            "Split {} rows into {} train / {} test",
            rows.len(),
            train.len(),
            test.len()
        );

        let (pipeline, x_train) = FeaturePipeline::fit(&train.features)?;
        let x_test = pipeline.transform_rows(&test.features)?;

        let mut results = Vec::with_capacity(self.models.len());
        let mut fitted = Vec::with_capacity(self.models.len());
        for mut model in self.models {
            let name = model.kind().display_name();
            info!("Training {name}...");
            let started = Instant::now();
            model.fit(x_train.view(), &train.labels)?;
            debug!("{name} fitted in {:.2}s", started.elapsed().as_secs_f64());

            let result = evaluate(model.kind(), &model, x_test.view(), &test.labels)?;
            info!("{name} - {}", result.summary());
            if let Some(tx) = &self.progress_tx {
                if tx.send(result.clone()).is_err() {
                    warn!("Progress receiver closed; {name} result not forwarded");
                }
            }
            results.push(result);
            fitted.push(model);
        }

        let Some((best_kind, best_auc)) = select_best(&results) else {
            warn!("No model produced an AUC; nothing saved");
            return Err(Error::NoModelWithAuc);
        };
        info!("Best model: {best_kind} with AUC: {best_auc:.4}");

        let positives = rows.labels.iter().filter(|&&l| l == 1).count();
        let report = TrainingReport {
            target: self.target,
            generated_at: Utc::now(),
            split: self.split,
            train_size: train.len(),
            test_size: test.len(),
            positive_rate: positives as f64 / rows.len() as f64,
            feature_names: pipeline.feature_names(),
            results,
            best_model: Some(best_kind),
            best_auc: Some(best_auc),
        };

        let report_path = self.model_dir.join(REPORT_FILE);
        report.save(&report_path)?;
        let comparison_path = self.model_dir.join(format!(
            "{COMPARISON_STEM}.{}",
            self.comparison_format.extension()
        ));
        ModelComparison::from_results(&report.results)
            .export(&comparison_path, self.comparison_format)?;

        let position = report
            .results
            .iter()
            .position(|r| r.kind == best_kind)
            .ok_or(Error::NoModelWithAuc)?;
        let model = fitted.swap_remove(position);
        let metrics = report.results.get(position).cloned();
        let artifact = ModelArtifact::new(self.target, model, pipeline, metrics);
        let artifact_path = self
            .model_dir
            .join(format!("best_model_{}.json", self.target.key()));
        artifact.save(&artifact_path)?;

        Ok(TrainingOutcome {
            report,
            artifact_path,
            report_path,
            comparison_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{
        GradientBoosting, GradientBoostingParams, LogisticRegression, ModelKind, RandomForest,
        RandomForestParams,
    };
    use crate::data::write_records;
    use crate::inference::ArrestPredictor;
    use crate::testing::fixtures::night_arrest_records;
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn small_models() -> Vec<TrainedModel> {
        vec![
            TrainedModel::RandomForest(RandomForest::new(RandomForestParams {
                n_estimators: 5,
                max_depth: Some(4),
                ..RandomForestParams::default()
            })),
            TrainedModel::LogisticRegression(LogisticRegression::default()),
            TrainedModel::GradientBoosting(GradientBoosting::new(GradientBoostingParams {
                n_estimators: 10,
                ..GradientBoostingParams::default()
            })),
        ]
    }

    #[test]
    fn rejects_empty_model_list_and_bad_fraction() {
        let bad_models = TrainingTask::new(
            "d.csv",
            "models",
            PredictionTarget::Arrest,
            SplitStrategy::default(),
            vec![],
        );
        assert!(matches!(bad_models, Err(Error::InvalidParameter(_))));

        let bad_split = TrainingTask::new(
            "d.csv",
            "models",
            PredictionTarget::Arrest,
            SplitStrategy::Stratified {
                test_size: 1.0,
                seed: 42,
            },
            small_models(),
        );
        assert!(matches!(bad_split, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn trains_compares_and_saves_the_best_model() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        write_records(&data, &night_arrest_records(400, 11)).unwrap();
        let models_dir = dir.path().join("models");

        let (tx, rx) = mpsc::channel();
        let outcome = TrainingTask::new(
            &data,
            &models_dir,
            PredictionTarget::Arrest,
            SplitStrategy::default(),
            small_models(),
        )
        .unwrap()
        .with_progress(tx)
        .run()
        .unwrap();

        let progressed: Vec<ModelKind> = rx.try_iter().map(|r| r.kind).collect();
        assert_eq!(
            progressed,
            [
                ModelKind::RandomForest,
                ModelKind::LogisticRegression,
                ModelKind::GradientBoosting
            ]
        );

        let report = &outcome.report;
        assert_eq!(report.train_size + report.test_size, 400);
        assert_eq!(report.test_size, 80);
        assert!(report.best_auc.unwrap() > 0.9);
        assert!(outcome.artifact_path.ends_with("best_model_arrest.json"));
        assert!(outcome.comparison_path.exists());
        assert_eq!(TrainingReport::load(&outcome.report_path).unwrap(), *report);

        let predictor = ArrestPredictor::load(&outcome.artifact_path).unwrap();
        assert_eq!(Some(predictor.kind()), report.best_model);
        assert!(predictor.artifact().metrics.is_some());
    }

    #[test]
    fn missing_dataset_is_an_io_error() {
        let dir = tempdir().unwrap();
        let task = TrainingTask::new(
            dir.path().join("absent.csv"),
            dir.path(),
            PredictionTarget::Arrest,
            SplitStrategy::default(),
            small_models(),
        )
        .unwrap();
        assert!(task.run().is_err());
    }

    #[test]
    fn fails_without_an_auc() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        // the temporal split leaves only 2023 rows to test, all negative
        let mut records = night_arrest_records(300, 5);
        for r in &mut records {
            if r.year == Some(2023.0) {
                r.arrest_target = Some(false);
            }
        }
        write_records(&data, &records).unwrap();

        let err = TrainingTask::new(
            &data,
            dir.path(),
            PredictionTarget::Arrest,
            SplitStrategy::Temporal { split_year: 2023 },
            vec![TrainedModel::with_defaults(ModelKind::LogisticRegression)],
        )
        .unwrap()
        .run()
        .unwrap_err();
        assert!(matches!(err, Error::NoModelWithAuc));
        assert!(!dir.path().join(REPORT_FILE).exists());
        assert!(!dir.path().join("model_comparison.csv").exists());
        assert!(!dir.path().join("best_model_arrest.json").exists());
    }

    #[test]
    fn comparison_is_written_in_the_chosen_format() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        write_records(&data, &night_arrest_records(200, 3)).unwrap();

        let outcome = TrainingTask::new(
            &data,
            dir.path(),
            PredictionTarget::Arrest,
            SplitStrategy::default(),
            vec![TrainedModel::with_defaults(ModelKind::LogisticRegression)],
        )
        .unwrap()
        .with_comparison_format(ComparisonFormat::Json)
        .run()
        .unwrap();

        assert_eq!(outcome.comparison_path, dir.path().join("model_comparison.json"));
        let text = std::fs::read_to_string(&outcome.comparison_path).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.as_array().map(Vec::len), Some(1));
        assert!(!dir.path().join("model_comparison.csv").exists());
    }

    #[test]
    fn closed_progress_receiver_does_not_stop_training() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("crimes.csv");
        write_records(&data, &night_arrest_records(200, 4)).unwrap();

        let (tx, rx) = mpsc::channel();
        drop(rx);
        let outcome = TrainingTask::new(
            &data,
            dir.path(),
            PredictionTarget::Arrest,
            SplitStrategy::default(),
            vec![TrainedModel::with_defaults(ModelKind::LogisticRegression)],
        )
        .unwrap()
        .with_progress(tx)
        .run()
        .unwrap();
        assert_eq!(outcome.report.results.len(), 1);
    }
}
