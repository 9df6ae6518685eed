use ndarray::{ArrayView1, ArrayView2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifiers::classifier::{check_row_width, normalize, sigmoid};
use crate::classifiers::tree::{DecisionTree, GrowthData, SplitCriterion, TreeParams};
use crate::error::{Error, Result};

/// Additive logistic model: `p = sigmoid(base_margin + rate * sum(tree(x)))`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostedTrees {
    base_margin: f64,
    learning_rate: f64,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
    n_features: usize,
}

pub(crate) struct BoostingRun<'a, C: ?Sized> {
    pub rounds: usize,
    pub learning_rate: f64,
    pub base_margin: f64,
    pub tree: TreeParams,
    pub criterion: &'a C,
}

impl BoostedTrees {
    /// Fits one tree per round on the residuals `y - p` and curvatures
    /// `p(1 - p)` of the current ensemble.
    pub(crate) fn fit<C>(x: ArrayView2<f64>, y: &[u8], run: &BoostingRun<'_, C>) -> Result<Self>
    where
        C: SplitCriterion + ?Sized,
    {
        if run.learning_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "learning rate must be positive, got {}",
                run.learning_rate
            )));
        }
        let n = x.nrows();
        let d = x.ncols();
        let targets: Vec<f64> = y.iter().map(|&l| f64::from(l)).collect();
        let mut margins = vec![run.base_margin; n];
        let mut grad = vec![0.0; n];
        let mut hess = vec![0.0; n];
        let mut importances = vec![0.0; d];
        let mut trees = Vec::with_capacity(run.rounds);
        // trees examine every feature, the generator is never drawn from
        let mut rng = StdRng::seed_from_u64(0);

        for round in 0..run.rounds {
            for i in 0..n {
                let p = sigmoid(margins[i]);
                grad[i] = targets[i] - p;
                hess[i] = p * (1.0 - p);
            }
            let data = GrowthData {
                x: x.view(),
                grad: &grad,
                hess: &hess,
            };
            let tree = DecisionTree::grow(
                &data,
                (0..n).collect(),
                run.criterion,
                &run.tree,
                &mut rng,
                &mut importances,
            );
            for (i, row) in x.rows().into_iter().enumerate() {
                margins[i] += run.learning_rate * tree.predict_value(row);
            }
            trees.push(tree);

            if round % 10 == 9 {
                debug!("Boosting round {}: {} trees", round + 1, trees.len());
            }
        }

        Ok(Self {
            base_margin: run.base_margin,
            learning_rate: run.learning_rate,
            trees,
            importances: normalize(importances),
            n_features: d,
        })
    }

    pub fn margin(&self, row: ArrayView1<f64>) -> Result<f64> {
        check_row_width(self.n_features, row)?;
        let sum: f64 = self.trees.iter().map(|t| t.predict_value(row)).sum();
        Ok(self.base_margin + self.learning_rate * sum)
    }

    pub fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        Ok(sigmoid(self.margin(row)?))
    }

    pub fn importances(&self) -> Option<Vec<f64>> {
        (self.n_features > 0).then(|| self.importances.clone())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn base_margin(&self) -> f64 {
        self.base_margin
    }
}

/// `ln(p / (1 - p))` of the positive rate, clamped away from 0 and 1.
pub(crate) fn prior_log_odds(y: &[u8]) -> f64 {
    let positives = y.iter().filter(|&&l| l == 1).count() as f64;
    let p = (positives / y.len().max(1) as f64).clamp(1e-6, 1.0 - 1e-6);
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::tree::SecondOrderSplitCriterion;
    use crate::testing::fixtures::separable_set;

    #[test]
    fn prior_log_odds_of_balanced_labels_is_zero() {
        assert!(prior_log_odds(&[0, 1, 0, 1]).abs() < 1e-12);
        assert!((prior_log_odds(&[0, 0, 0, 1]) - (1.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!(prior_log_odds(&[1, 1]).is_finite());
    }

    #[test]
    fn several_rounds_reuse_the_training_view() {
        let (x, y) = separable_set();
        let view = x.view();
        let criterion = SecondOrderSplitCriterion::default();
        let run = BoostingRun {
            rounds: 5,
            learning_rate: 0.3,
            base_margin: prior_log_odds(&y),
            tree: TreeParams {
                max_depth: Some(2),
                ..TreeParams::default()
            },
            criterion: &criterion,
        };
        let model = BoostedTrees::fit(view, &y, &run).unwrap();
        assert_eq!(model.n_trees(), 5);

        for (row, &label) in view.rows().into_iter().zip(&y) {
            let p = model.predict_proba(row).unwrap();
            assert_eq!(u8::from(p > 0.5), label);
        }
    }
}
