use crate::evaluation::Measurement;

/// Accumulates labelled predictions and reports named scores.
pub trait PerformanceEvaluator {
    /// Feeds one example with one score per class. The predicted class is
    /// the arg-max; non-positive weights and all-NaN scores are skipped.
    fn add_result(&mut self, true_class: usize, weight: f64, class_votes: &[f64]);

    fn performance(&self) -> Vec<Measurement>;

    /// Feeds a binary hold-out set given the positive-class probabilities.
    fn add_probabilities(&mut self, labels: &[u8], probabilities: &[f64]) {
        for (&y, &p) in labels.iter().zip(probabilities) {
            self.add_result(usize::from(y), 1.0, &[1.0 - p, p]);
        }
    }
}
