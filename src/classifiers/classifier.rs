use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Binary probabilistic classifier over scaled feature rows.
pub trait Classifier {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()>;

    /// Probability of class 1, in `[0, 1]`.
    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64>;

    fn predict(&self, row: ArrayView1<f64>) -> Result<u8> {
        Ok(u8::from(self.predict_proba(row)? > 0.5))
    }

    fn predict_proba_batch(&self, x: ArrayView2<f64>) -> Result<Vec<f64>> {
        x.rows().into_iter().map(|r| self.predict_proba(r)).collect()
    }

    /// Relative importance per input column, summing to 1 when available.
    fn feature_importances(&self) -> Option<Vec<f64>>;
}

/// Shared input validation for `fit`: non-empty, aligned, both classes present.
pub(crate) fn check_training_data(x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
    if x.nrows() == 0 || y.is_empty() {
        return Err(Error::EmptyDataset);
    }
    if x.nrows() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.nrows(),
            found: y.len(),
        });
    }
    let first = y[0];
    if y.iter().all(|&l| l == first) {
        return Err(Error::SingleClass(first));
    }
    Ok(())
}

pub(crate) fn check_row_width(expected: usize, row: ArrayView1<f64>) -> Result<()> {
    if expected == 0 {
        return Err(Error::NotFitted);
    }
    if row.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Rescales non-negative scores to sum to 1; all-zero input stays zero.
pub(crate) fn normalize(mut v: Vec<f64>) -> Vec<f64> {
    let total: f64 = v.iter().sum();
    if total > 0.0 {
        v.iter_mut().for_each(|x| *x /= total);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn validation_catches_bad_inputs() {
        let x = array![[0.0], [1.0]];
        assert!(check_training_data(x.view(), &[0, 1]).is_ok());
        assert!(matches!(
            check_training_data(x.view(), &[1, 1]),
            Err(Error::SingleClass(1))
        ));
        assert!(matches!(
            check_training_data(x.view(), &[0]),
            Err(Error::DimensionMismatch { .. })
        ));
        let empty = ndarray::Array2::<f64>::zeros((0, 1));
        assert!(matches!(
            check_training_data(empty.view(), &[]),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(!sigmoid(-800.0).is_nan());
    }

    #[test]
    fn normalize_sums_to_one() {
        let v = normalize(vec![1.0, 3.0]);
        assert_eq!(v, vec![0.25, 0.75]);
        assert_eq!(normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }
}
