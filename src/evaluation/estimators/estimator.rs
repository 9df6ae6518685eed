/// Incremental scalar estimator (e.g., a weighted mean).
///
/// Implementations accept values via [`add_weighted`](Estimator::add_weighted)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates an observation with weight `w`.
    fn add_weighted(&mut self, v: f64, w: f64);

    /// Incorporates an observation with unit weight.
    fn add(&mut self, v: f64) {
        self.add_weighted(v, 1.0);
    }

    /// Returns the current estimate.
    fn estimation(&self) -> f64;
}
