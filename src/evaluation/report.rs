use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::evaluation::ConfusionMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: u64,
}

/// Per-class precision, recall and F1 with macro and support-weighted
/// averages. Undefined ratios (no predictions, no support) count as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(p: f64, r: f64) -> f64 {
    if p + r > 0.0 {
        2.0 * p * r / (p + r)
    } else {
        0.0
    }
}

impl ClassificationReport {
    pub fn from_confusion(m: &ConfusionMatrix) -> Self {
        let classes: Vec<ClassMetrics> = (0..2)
            .map(|c| {
                let precision = ratio(m.counts[c][c], m.predicted(c));
                let recall = ratio(m.counts[c][c], m.support(c));
                ClassMetrics {
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support: m.support(c),
                }
            })
            .collect();

        let total = m.total();
        let n = classes.len() as f64;
        let macro_avg = ClassMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
            support: total,
        };
        let weighted = |field: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| field(c) * c.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
            support: total,
        };

        Self {
            accuracy: if total == 0 { 0.0 } else { m.accuracy() },
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>14}{:>11}{:>11}{:>11}{:>11}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (c, m) in self.classes.iter().enumerate() {
            writeln!(
                f,
                "{:>14}{:>11.2}{:>11.2}{:>11.2}{:>11}",
                c, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(
            f,
            "{:>14}{:>11}{:>11}{:>11.2}{:>11}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14}{:>11.2}{:>11.2}{:>11.2}{:>11}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hand_computed_values() {
        // true 0: 1 right, 1 wrong; true 1: 2 right, 1 wrong
        let m = ConfusionMatrix {
            counts: [[1, 1], [1, 2]],
        };
        let r = ClassificationReport::from_confusion(&m);
        assert!((r.classes[0].precision - 0.5).abs() < 1e-12);
        assert!((r.classes[0].recall - 0.5).abs() < 1e-12);
        assert!((r.classes[1].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((r.classes[1].recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((r.accuracy - 0.6).abs() < 1e-12);
        assert!((r.macro_avg.f1 - (0.5 + 2.0 / 3.0) / 2.0).abs() < 1e-12);
        let expected_weighted = (0.5 * 2.0 + 2.0 / 3.0 * 3.0) / 5.0;
        assert!((r.weighted_avg.precision - expected_weighted).abs() < 1e-12);
        assert_eq!(r.weighted_avg.support, 5);
    }

    #[test]
    fn never_predicted_class_scores_zero() {
        let m = ConfusionMatrix {
            counts: [[4, 0], [1, 0]],
        };
        let r = ClassificationReport::from_confusion(&m);
        assert_eq!(r.classes[1].precision, 0.0);
        assert_eq!(r.classes[1].f1, 0.0);
        let text = r.to_string();
        assert!(text.contains("weighted avg"));
        assert!(text.contains("accuracy"));
    }
}
