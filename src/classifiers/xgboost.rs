use ndarray::{ArrayView1, ArrayView2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifiers::Classifier;
use crate::classifiers::boosting::{BoostedTrees, BoostingRun};
use crate::classifiers::classifier::check_training_data;
use crate::classifiers::tree::{SecondOrderSplitCriterion, TreeParams};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct XGBoostParams {
    /// Boosting rounds
    pub n_estimators: usize,
    /// Shrinkage (`eta`)
    pub learning_rate: f64,
    pub max_depth: usize,
    /// L2 penalty on leaf weights
    pub lambda: f64,
    /// Minimum gain to keep a split
    pub gamma: f64,
    /// Minimum hessian sum per child
    pub min_child_weight: f64,
    /// Initial probability
    pub base_score: f64,
}

impl Default for XGBoostParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.3,
            max_depth: 6,
            lambda: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
            base_score: 0.5,
        }
    }
}

/// Second-order gradient boosting with regularised leaf weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XGBoost {
    params: XGBoostParams,
    ensemble: Option<BoostedTrees>,
}

impl XGBoost {
    pub fn new(params: XGBoostParams) -> Self {
        Self {
            params,
            ensemble: None,
        }
    }

    pub fn ensemble(&self) -> Option<&BoostedTrees> {
        self.ensemble.as_ref()
    }
}

impl Classifier for XGBoost {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        let base = self.params.base_score;
        if !(base > 0.0 && base < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "base score must lie in (0, 1), got {base}"
            )));
        }
        let criterion = SecondOrderSplitCriterion {
            lambda: self.params.lambda,
            gamma: self.params.gamma,
            min_child_weight: self.params.min_child_weight,
        };
        let run = BoostingRun {
            rounds: self.params.n_estimators,
            learning_rate: self.params.learning_rate,
            base_margin: (base / (1.0 - base)).ln(),
            tree: TreeParams {
                max_depth: Some(self.params.max_depth),
                min_samples_split: 2,
                max_features: None,
            },
            criterion: &criterion,
        };
        self.ensemble = Some(BoostedTrees::fit(x, y, &run)?);
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        self.ensemble
            .as_ref()
            .ok_or(Error::NotFitted)?
            .predict_proba(row)
    }

    fn feature_importances(&self) -> Option<Vec<f64>> {
        self.ensemble.as_ref().and_then(BoostedTrees::importances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::separable_set;
    use ndarray::array;

    #[test]
    fn separates_toy_set() {
        let (x, y) = separable_set();
        let mut xgb = XGBoost::new(XGBoostParams::default());
        xgb.fit(x.view(), &y).unwrap();

        for (row, &label) in x.rows().into_iter().zip(&y) {
            let p = xgb.predict_proba(row).unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(xgb.predict(row).unwrap(), label);
        }
        assert_eq!(xgb.ensemble().unwrap().base_margin(), 0.0);
    }

    #[test]
    fn zero_rounds_predicts_base_score() {
        let x = array![[0.0], [1.0]];
        let mut xgb = XGBoost::new(XGBoostParams {
            n_estimators: 0,
            base_score: 0.2,
            ..XGBoostParams::default()
        });
        xgb.fit(x.view(), &[0, 1]).unwrap();
        let p = xgb.predict_proba(array![0.0].view()).unwrap();
        assert!((p - 0.2).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_base_score() {
        let x = array![[0.0], [1.0]];
        let mut xgb = XGBoost::new(XGBoostParams {
            base_score: 1.0,
            ..XGBoostParams::default()
        });
        assert!(matches!(
            xgb.fit(x.view(), &[0, 1]),
            Err(Error::InvalidParameter(_))
        ));
    }
}
