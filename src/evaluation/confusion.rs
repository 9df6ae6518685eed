use serde::{Deserialize, Serialize};

/// 2x2 counts indexed as `counts[true][predicted]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(labels: &[u8], predictions: &[u8]) -> Self {
        let mut m = Self::default();
        for (&t, &p) in labels.iter().zip(predictions) {
            m.counts[usize::from(t.min(1))][usize::from(p.min(1))] += 1;
        }
        m
    }

    pub fn true_negatives(&self) -> u64 {
        self.counts[0][0]
    }

    pub fn false_positives(&self) -> u64 {
        self.counts[0][1]
    }

    pub fn false_negatives(&self) -> u64 {
        self.counts[1][0]
    }

    pub fn true_positives(&self) -> u64 {
        self.counts[1][1]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Rows with true class `c`.
    pub fn support(&self, c: usize) -> u64 {
        self.counts[c].iter().sum()
    }

    /// Rows predicted as class `c`.
    pub fn predicted(&self, c: usize) -> u64 {
        self.counts[0][c] + self.counts[1][c]
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return f64::NAN;
        }
        (self.true_negatives() + self.true_positives()) as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_true_then_predicted() {
        let m = ConfusionMatrix::from_predictions(&[0, 0, 1, 1, 1], &[0, 1, 1, 0, 1]);
        assert_eq!(m.counts, [[1, 1], [1, 2]]);
        assert_eq!(m.true_positives(), 2);
        assert_eq!(m.false_positives(), 1);
        assert_eq!(m.support(1), 3);
        assert_eq!(m.predicted(1), 3);
        assert!((m.accuracy() - 0.6).abs() < 1e-12);
    }
}
