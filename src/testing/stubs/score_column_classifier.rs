use ndarray::{ArrayView1, ArrayView2};

use crate::classifiers::Classifier;
use crate::error::{Error, Result};

/// Reports the first column of each row as its probability, clamped to
/// `[0, 1]`. `fit` ignores its inputs.
#[derive(Debug, Default)]
pub struct ScoreColumnClassifier {
    pub importances: Option<Vec<f64>>,
}

impl Classifier for ScoreColumnClassifier {
    fn fit(&mut self, _x: ArrayView2<f64>, _y: &[u8]) -> Result<()> {
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        row.first()
            .map(|p| p.clamp(0.0, 1.0))
            .ok_or(Error::DimensionMismatch {
                expected: 1,
                found: 0,
            })
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.importances.clone()
    }
}
