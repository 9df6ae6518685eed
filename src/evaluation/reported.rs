//! Benchmark figures from the full Chicago dataset run, shown on the
//! dashboard regardless of which artifact is loaded.

use serde::Serialize;

use crate::classifiers::ModelKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportedRow {
    pub model: ModelKind,
    pub name: &'static str,
    pub accuracy: f64,
    pub auc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportedMetrics {
    pub accuracy: &'static str,
    pub accuracy_delta: &'static str,
    pub auc: &'static str,
    pub auc_delta: &'static str,
    pub best_model: ModelKind,
    pub training_samples: &'static str,
    pub comparison: [ReportedRow; 4],
}

const fn row(model: ModelKind, name: &'static str, accuracy: f64, auc: f64) -> ReportedRow {
    ReportedRow {
        model,
        name,
        accuracy,
        auc,
    }
}

/// Best first, as the dashboard lists them.
pub const REPORTED: ReportedMetrics = ReportedMetrics {
    accuracy: "84.9%",
    accuracy_delta: "0.4%",
    auc: "0.748",
    auc_delta: "0.019",
    best_model: ModelKind::XGBoost,
    training_samples: "446,254",
    comparison: [
        row(ModelKind::XGBoost, "XGBoost", 0.8492, 0.7483),
        row(ModelKind::RandomForest, "Random Forest", 0.8485, 0.7290),
        row(ModelKind::GradientBoosting, "Gradient Boosting", 0.8397, 0.7197),
        row(ModelKind::LogisticRegression, "Logistic Regression", 0.8325, 0.6427),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_figures() {
        assert_eq!(REPORTED.accuracy, "84.9%");
        assert_eq!(REPORTED.auc, "0.748");
        assert_eq!(REPORTED.best_model, ModelKind::XGBoost);
    }

    #[test]
    fn table_is_sorted_by_auc_and_names_match_kinds() {
        let rows = &REPORTED.comparison;
        assert!(rows.windows(2).all(|w| w[0].auc > w[1].auc));
        for r in rows {
            assert_eq!(r.name, r.model.display_name());
        }
        let json = serde_json::to_value(REPORTED).unwrap();
        assert_eq!(json["comparison"][0]["model"], "xgboost");
        assert_eq!(json["training_samples"], "446,254");
    }
}
