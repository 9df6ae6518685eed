use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-column standardisation `(x - mean) / scale`.
///
/// `scale` is the population standard deviation, replaced by 1 for constant
/// columns so they map to 0 instead of NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(x: ArrayView2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        let mean: Array1<f64> = x.mean_axis(Axis(0)).ok_or(Error::EmptyDataset)?;
        let std: Array1<f64> = x.std_axis(Axis(0), 0.0);
        let scale = std
            .iter()
            .map(|&s| if s > f64::EPSILON && s.is_finite() { s } else { 1.0 })
            .collect();
        Ok(Self {
            mean: mean.to_vec(),
            scale,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn transform_row(&self, row: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_width(row.len())?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.check_width(x.ncols())?;
        let mut out = x.to_owned();
        for mut row in out.rows_mut() {
            for ((v, m), s) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
                *v = (*v - m) / s;
            }
        }
        Ok(out)
    }

    fn check_width(&self, found: usize) -> Result<()> {
        if found != self.mean.len() {
            return Err(Error::DimensionMismatch {
                expected: self.mean.len(),
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standardises_columns() {
        let x = array![[1.0, 5.0], [3.0, 5.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        assert_eq!(scaler.mean(), [2.0, 5.0]);
        assert_eq!(scaler.scale(), [1.0, 1.0]);

        let t = scaler.transform(x.view()).unwrap();
        assert_eq!(t, array![[-1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn uses_population_deviation() {
        let x = array![[0.0], [2.0], [4.0], [6.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        assert!((scaler.scale()[0] - 5.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_width() {
        let scaler = StandardScaler::fit(array![[1.0, 2.0]].view()).unwrap();
        let err = scaler.transform_row(array![1.0].view()).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        ));
    }
}
