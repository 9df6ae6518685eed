use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// Hold-out agreement scores: accuracy, Cohen's κ and κ_m.
///
/// κ compares accuracy with the chance agreement of the predicted and true
/// class marginals. κ_m compares it with always predicting the most
/// frequent true class. All estimates are weighted means over the rows
/// fed so far. Per-class precision and recall live in
/// [`ClassificationReport`](crate::evaluation::ClassificationReport).
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    weight_correct: E,
    predicted_share: Vec<E>,
    true_share: Vec<E>,
    total_weight: f64,
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new(num_classes: usize) -> Self {
        let make_vec = || (0..num_classes).map(|_| E::default()).collect::<Vec<_>>();
        Self {
            weight_correct: E::default(),
            predicted_share: make_vec(),
            true_share: make_vec(),
            total_weight: 0.0,
        }
    }

    fn argmax(v: &[f64]) -> Option<usize> {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &x) in v.iter().enumerate() {
            if !x.is_finite() {
                continue;
            }
            if best.is_none() || x > best_value {
                best = Some(i);
                best_value = x;
            }
        }
        best
    }

    /// Accuracy of always predicting the most frequent true class.
    fn majority_accuracy(&self) -> f64 {
        self.true_share
            .iter()
            .map(Estimator::estimation)
            .filter(|p| p.is_finite())
            .fold(f64::NAN, f64::max)
    }

    fn chance_agreement(&self) -> f64 {
        self.predicted_share
            .iter()
            .zip(&self.true_share)
            .map(|(pp, pt)| (pp.estimation(), pt.estimation()))
            .filter(|(pp, pt)| pp.is_finite() && pt.is_finite())
            .map(|(pp, pt)| pp * pt)
            .sum()
    }
}

/// `(observed - baseline) / (1 - baseline)`, NaN when the baseline is 1.
fn agreement_over(observed: f64, baseline: f64) -> f64 {
    let d = 1.0 - baseline;
    if d.abs() > f64::EPSILON {
        (observed - baseline) / d
    } else {
        f64::NAN
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn add_result(&mut self, y: usize, w: f64, class_votes: &[f64]) {
        if w <= 0.0 || y >= self.true_share.len() {
            return;
        }
        let Some(yhat) = Self::argmax(class_votes).filter(|&c| c < self.predicted_share.len())
        else {
            return;
        };
        self.total_weight += w;

        let hit = if yhat == y { 1.0 } else { 0.0 };
        self.weight_correct.add_weighted(hit, w);

        for (c, est) in self.predicted_share.iter_mut().enumerate() {
            est.add_weighted(if c == yhat { 1.0 } else { 0.0 }, w);
        }
        for (c, est) in self.true_share.iter_mut().enumerate() {
            est.add_weighted(if c == y { 1.0 } else { 0.0 }, w);
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let accuracy = self.weight_correct.estimation();
        if self.total_weight <= 0.0 {
            return vec![
                Measurement::new("accuracy", accuracy),
                Measurement::new("kappa", 0.0),
                Measurement::new("kappa_m", 0.0),
            ];
        }
        vec![
            Measurement::new("accuracy", accuracy),
            Measurement::new("kappa", agreement_over(accuracy, self.chance_agreement())),
            Measurement::new("kappa_m", agreement_over(accuracy, self.majority_accuracy())),
        ]
    }
}
