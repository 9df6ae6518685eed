use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifiers::classifier::{check_row_width, check_training_data, normalize};
use crate::classifiers::tree::{DecisionTree, GiniSplitCriterion, GrowthData, TreeParams};
use crate::classifiers::Classifier;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RandomForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Maximum tree depth; unbounded when absent
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 50,
            max_depth: None,
            min_samples_split: 2,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Bagged Gini trees with `sqrt(d)` features examined per split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: RandomForestParams,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(params: RandomForestParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn params(&self) -> &RandomForestParams {
        &self.params
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        if self.params.n_estimators == 0 {
            return Err(Error::InvalidParameter(
                "random forest needs at least one tree".into(),
            ));
        }

        let n = x.nrows();
        let d = x.ncols();
        let grad: Vec<f64> = y.iter().map(|&l| f64::from(l)).collect();
        let hess = vec![1.0; n];
        let data = GrowthData {
            x: x.view(),
            grad: &grad,
            hess: &hess,
        };
        let tree_params = TreeParams {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split,
            max_features: Some(((d as f64).sqrt() as usize).max(1)),
        };

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut trees = Vec::with_capacity(self.params.n_estimators);
        let mut importances = vec![0.0; d];

        for _ in 0..self.params.n_estimators {
            let samples: Vec<usize> = if self.params.bootstrap {
                (0..n).map(|_| rng.random_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            let mut tree_importances = vec![0.0; d];
            let tree = DecisionTree::grow(
                &data,
                samples,
                &GiniSplitCriterion::new(),
                &tree_params,
                &mut rng,
                &mut tree_importances,
            );
            for (acc, v) in importances.iter_mut().zip(normalize(tree_importances)) {
                *acc += v;
            }
            trees.push(tree);
        }

        debug!(
            "Random forest grew {} trees, mean depth {:.1}",
            trees.len(),
            trees.iter().map(DecisionTree::depth).sum::<usize>() as f64 / trees.len() as f64
        );

        self.trees = trees;
        self.importances = normalize(importances);
        self.n_features = d;
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        check_row_width(self.n_features, row)?;
        if self.trees.is_empty() {
            return Err(Error::NotFitted);
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_value(row)).sum();
        Ok((sum / self.trees.len() as f64).clamp(0.0, 1.0))
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        (!self.importances.is_empty()).then(|| self.importances.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::separable_set;
    use ndarray::array;

    fn small() -> RandomForest {
        RandomForest::new(RandomForestParams {
            n_estimators: 10,
            ..RandomForestParams::default()
        })
    }

    #[test]
    fn separates_toy_set() {
        let (x, y) = separable_set();
        let mut rf = small();
        rf.fit(x.view(), &y).unwrap();

        for (row, &label) in x.rows().into_iter().zip(&y) {
            let p = rf.predict_proba(row).unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(rf.predict(row).unwrap(), label);
        }
        let imp = rf.feature_importances().unwrap();
        assert_eq!(imp.len(), 2);
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = separable_set();
        let mut a = small();
        let mut b = small();
        a.fit(x.view(), &y).unwrap();
        b.fit(x.view(), &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unfitted_and_misshaped_inputs_fail() {
        let rf = small();
        assert!(matches!(
            rf.predict_proba(array![0.0, 0.0].view()),
            Err(Error::NotFitted)
        ));

        let (x, y) = separable_set();
        let mut rf = small();
        rf.fit(x.view(), &y).unwrap();
        assert!(matches!(
            rf.predict_proba(array![0.0].view()),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn single_class_is_rejected() {
        let x = array![[0.0], [1.0]];
        let mut rf = small();
        assert!(matches!(rf.fit(x.view(), &[0, 0]), Err(Error::SingleClass(0))));
    }
}
