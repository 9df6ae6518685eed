use std::fs::{self, File};
use std::path::Path;

use csv::WriterBuilder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::ModelResult;

/// File format of the exported comparison table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ComparisonFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ComparisonFormat::Csv => "csv",
            ComparisonFormat::Tsv => "tsv",
            ComparisonFormat::Json => "json",
        }
    }
}

/// One line of the model comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub model: String,
    pub accuracy: f64,
    pub auc: Option<f64>,
    pub kappa: Option<f64>,
}

impl From<&ModelResult> for ComparisonRow {
    fn from(r: &ModelResult) -> Self {
        Self {
            model: r.name.clone(),
            accuracy: r.accuracy,
            auc: r.auc,
            kappa: r.kappa,
        }
    }
}

/// Models in training order with their hold-out scores.
#[derive(Debug, Clone, Default)]
pub struct ModelComparison {
    entries: Vec<ComparisonRow>,
}

impl ModelComparison {
    pub fn from_results(results: &[ModelResult]) -> Self {
        Self {
            entries: results.iter().map(ComparisonRow::from).collect(),
        }
    }

    /// Rows sorted by AUC, best first; rows without AUC go last.
    pub fn ranked(&self) -> Vec<ComparisonRow> {
        let mut rows = self.entries.clone();
        rows.sort_by(|a, b| {
            let key = |r: &ComparisonRow| r.auc.unwrap_or(f64::NEG_INFINITY);
            key(b).total_cmp(&key(a))
        });
        rows
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: ComparisonFormat) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        match fmt {
            ComparisonFormat::Csv => self.export_with_delimiter(path, b','),
            ComparisonFormat::Tsv => self.export_with_delimiter(path, b'\t'),
            ComparisonFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> Result<()> {
        let mut w = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_path(path)?;
        w.write_record(["model", "accuracy", "auc", "kappa"])?;
        for r in &self.entries {
            w.write_record([
                r.model.clone(),
                format!("{:.4}", r.accuracy),
                r.auc.map(|a| format!("{a:.4}")).unwrap_or_default(),
                r.kappa.map(|k| format!("{k:.4}")).unwrap_or_default(),
            ])?;
        }
        w.flush()?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let w = File::create(path)?;
        serde_json::to_writer_pretty(w, &self.entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn row(model: &str, accuracy: f64, auc: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            model: model.into(),
            accuracy,
            auc,
            kappa: Some(0.25),
        }
    }

    fn sample() -> ModelComparison {
        ModelComparison {
            entries: vec![
                row("Random Forest", 0.8485, Some(0.729)),
                row("XGBoost", 0.8492, Some(0.7483)),
                row("Logistic Regression", 0.5, None),
            ],
        }
    }

    #[test]
    fn formats_parse_from_lowercase_names() {
        let f: ComparisonFormat = serde_json::from_str("\"tsv\"").unwrap();
        assert_eq!(f, ComparisonFormat::Tsv);
        assert_eq!(ComparisonFormat::default().extension(), "csv");
        assert_eq!(ComparisonFormat::Json.extension(), "json");
    }

    #[test]
    fn ranked_puts_best_auc_first_and_missing_last() {
        let names: Vec<String> = sample().ranked().into_iter().map(|r| r.model).collect();
        assert_eq!(names, ["XGBoost", "Random Forest", "Logistic Regression"]);
    }

    #[test]
    fn export_csv() {
        let tf = NamedTempFile::new().unwrap();
        sample().export(tf.path(), ComparisonFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
model,accuracy,auc,kappa
Random Forest,0.8485,0.7290,0.2500
XGBoost,0.8492,0.7483,0.2500
Logistic Regression,0.5000,,0.2500
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv() {
        let tf = NamedTempFile::new().unwrap();
        let c = ModelComparison {
            entries: vec![row("XGBoost", 1.0, Some(0.5))],
        };
        c.export(tf.path(), ComparisonFormat::Tsv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        assert_eq!(got, "model\taccuracy\tauc\tkappa\nXGBoost\t1.0000\t0.5000\t0.2500\n");
    }

    #[test]
    fn export_json() {
        let tf = NamedTempFile::new().unwrap();
        sample().export(tf.path(), ComparisonFormat::Json).unwrap();

        let got: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tf.path()).unwrap()).unwrap();
        assert_eq!(got.as_array().map(Vec::len), Some(3));
        assert_eq!(got[1]["model"], "XGBoost");
        assert!(got[2]["auc"].is_null());
    }

    #[test]
    fn empty_export_keeps_header() {
        let c = ModelComparison::from_results(&[]);

        let tf = NamedTempFile::new().unwrap();
        c.export(tf.path(), ComparisonFormat::Csv).unwrap();
        assert_eq!(
            fs::read_to_string(tf.path()).unwrap(),
            "model,accuracy,auc,kappa\n"
        );
    }
}
