use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifiers::{Classifier, ModelKind};
use crate::core::target::PredictionTarget;
use crate::data::split::SplitStrategy;
use crate::error::{Error, Result};
use crate::evaluation::{
    BasicClassificationEvaluator, BasicEstimator, ClassificationReport, ConfusionMatrix,
    Measurement, PerformanceEvaluator, roc_auc,
};

/// Hold-out scores of one fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub kind: ModelKind,
    pub name: String,
    pub accuracy: f64,
    /// `None` when the test labels hold a single class.
    pub auc: Option<f64>,
    /// Cohen's kappa; `None` when undefined for the test labels
    pub kappa: Option<f64>,
    pub kappa_m: Option<f64>,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
    pub feature_importances: Option<Vec<f64>>,
}

impl ModelResult {
    /// `Accuracy: 0.8492, AUC: 0.7483` style summary.
    pub fn summary(&self) -> String {
        let auc = self
            .auc
            .map(|a| format!("{a:.4}"))
            .unwrap_or_else(|| "N/A".to_string());
        format!("Accuracy: {:.4}, AUC: {auc}", self.accuracy)
    }
}

/// Scores `model` on a held-out matrix.
pub fn evaluate<C: Classifier + ?Sized>(
    kind: ModelKind,
    model: &C,
    x_test: ArrayView2<f64>,
    y_test: &[u8],
) -> Result<ModelResult> {
    if y_test.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if x_test.nrows() != y_test.len() {
        return Err(Error::DimensionMismatch {
            expected: x_test.nrows(),
            found: y_test.len(),
        });
    }
    let probabilities = model.predict_proba_batch(x_test)?;
    let predictions: Vec<u8> = probabilities.iter().map(|&p| u8::from(p > 0.5)).collect();

    let mut evaluator = BasicClassificationEvaluator::<BasicEstimator>::new(2);
    evaluator.add_probabilities(y_test, &probabilities);
    let scores = evaluator.performance();
    let score = |name: &str| scores.iter().find(|m| m.name == name).and_then(Measurement::defined);
    debug!(
        "{kind}: {}",
        scores.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    let confusion = ConfusionMatrix::from_predictions(y_test, &predictions);

    Ok(ModelResult {
        kind,
        name: kind.display_name().to_string(),
        accuracy: confusion.accuracy(),
        auc: roc_auc(y_test, &probabilities),
        kappa: score("kappa"),
        kappa_m: score("kappa_m"),
        report: ClassificationReport::from_confusion(&confusion),
        confusion,
        feature_importances: model.feature_importances(),
    })
}

/// Everything a training run produced, persisted as `training_report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub target: PredictionTarget,
    pub generated_at: DateTime<Utc>,
    pub split: SplitStrategy,
    pub train_size: usize,
    pub test_size: usize,
    /// Share of positive labels across train and test
    pub positive_rate: f64,
    pub feature_names: Vec<String>,
    pub results: Vec<ModelResult>,
    pub best_model: Option<ModelKind>,
    pub best_auc: Option<f64>,
}

impl TrainingReport {
    pub fn best_result(&self) -> Option<&ModelResult> {
        let best = self.best_model?;
        self.results.iter().find(|r| r.kind == best)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Picks the model with the strictly highest AUC, starting from 0.
///
/// Earlier models win ties. Models without an AUC are never picked.
pub fn select_best(results: &[ModelResult]) -> Option<(ModelKind, f64)> {
    let mut best: Option<(ModelKind, f64)> = None;
    let mut best_score = 0.0;
    for r in results {
        if let Some(auc) = r.auc {
            if auc > best_score {
                best_score = auc;
                best = Some((r.kind, auc));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{LogisticRegression, TrainedModel};
    use crate::testing::ScoreColumnClassifier;
    use crate::testing::fixtures::separable_set;
    use tempfile::tempdir;

    fn result(kind: ModelKind, auc: Option<f64>) -> ModelResult {
        let confusion = ConfusionMatrix::default();
        ModelResult {
            kind,
            name: kind.display_name().to_string(),
            accuracy: 0.5,
            auc,
            kappa: Some(0.0),
            kappa_m: None,
            report: ClassificationReport::from_confusion(&confusion),
            confusion,
            feature_importances: None,
        }
    }

    #[test]
    fn evaluate_scores_a_separating_model() {
        let (x, y) = separable_set();
        let mut model = LogisticRegression::default();
        model.fit(x.view(), &y).unwrap();

        let r = evaluate(ModelKind::LogisticRegression, &model, x.view(), &y).unwrap();
        assert_eq!(r.name, "Logistic Regression");
        assert!((r.accuracy - 1.0).abs() < 1e-12);
        assert!((r.auc.unwrap() - 1.0).abs() < 1e-12);
        assert!((r.kappa.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(r.confusion.total(), y.len() as u64);
        assert_eq!(r.feature_importances.as_ref().map(Vec::len), Some(2));
        assert_eq!(r.summary(), "Accuracy: 1.0000, AUC: 1.0000");
    }

    #[test]
    fn evaluate_reports_missing_auc_for_single_class() {
        let (x, y) = separable_set();
        let mut model = TrainedModel::with_defaults(ModelKind::LogisticRegression);
        model.fit(x.view(), &y).unwrap();

        let positives: Vec<usize> = (0..y.len()).filter(|&i| y[i] == 1).collect();
        let x_pos = x.select(ndarray::Axis(0), &positives);
        let y_pos = vec![1u8; positives.len()];
        let r = evaluate(model.kind(), &model, x_pos.view(), &y_pos).unwrap();
        assert_eq!(r.auc, None);
        assert!(r.summary().ends_with("AUC: N/A"));
    }

    #[test]
    fn evaluate_thresholds_scores_at_one_half() {
        let model = ScoreColumnClassifier::default();
        let x = ndarray::array![[0.1], [0.3], [0.35], [0.8], [0.5]];
        let y = [0, 1, 0, 1, 1];

        let r = evaluate(ModelKind::XGBoost, &model, x.view(), &y).unwrap();
        // 0.5 is not above the threshold
        assert_eq!(r.confusion.counts, [[2, 0], [2, 1]]);
        assert!((r.accuracy - 0.6).abs() < 1e-12);
        assert!(r.auc.unwrap() > 0.8);
        assert_eq!(r.feature_importances, None);

        assert!(matches!(
            evaluate(ModelKind::XGBoost, &model, x.view(), &y[..2]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn best_model_needs_strictly_greater_auc() {
        let results = vec![
            result(ModelKind::XGBoost, Some(0.7)),
            result(ModelKind::RandomForest, Some(0.7)),
            result(ModelKind::LogisticRegression, None),
            result(ModelKind::GradientBoosting, Some(0.65)),
        ];
        assert_eq!(select_best(&results), Some((ModelKind::XGBoost, 0.7)));

        let none = vec![result(ModelKind::XGBoost, None)];
        assert_eq!(select_best(&none), None);
    }

    #[test]
    fn report_survives_a_save_load_cycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("training_report.json");
        let report = TrainingReport {
            target: PredictionTarget::Arrest,
            generated_at: Utc::now(),
            split: SplitStrategy::default(),
            train_size: 8,
            test_size: 2,
            positive_rate: 0.2,
            feature_names: vec!["Hour".into()],
            results: vec![result(ModelKind::RandomForest, Some(0.8))],
            best_model: Some(ModelKind::RandomForest),
            best_auc: Some(0.8),
        };
        report.save(&path).unwrap();

        let loaded = TrainingReport::load(&path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.best_result().map(|r| r.kind), Some(ModelKind::RandomForest));
    }
}
