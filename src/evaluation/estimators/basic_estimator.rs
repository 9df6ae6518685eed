use crate::evaluation::estimators::Estimator;

/// Weighted mean estimator: `mean = sum(w * v) / sum(w)`.
///
/// NaN observations and non-positive weights are ignored, so callers can
/// feed "not applicable" values without branching.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEstimator {
    weight: f64,
    sum: f64,
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add_weighted(&mut self, v: f64, w: f64) {
        if v.is_nan() || !(w > 0.0) {
            return;
        }
        self.weight += w;
        self.sum += w * v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            f64::NAN
        }
    }
}
