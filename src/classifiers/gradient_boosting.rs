use ndarray::{ArrayView1, ArrayView2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifiers::Classifier;
use crate::classifiers::boosting::{BoostedTrees, BoostingRun, prior_log_odds};
use crate::classifiers::classifier::check_training_data;
use crate::classifiers::tree::{TreeParams, VarianceSplitCriterion};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GradientBoostingParams {
    /// Boosting stages
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for GradientBoostingParams {
    fn default() -> Self {
        Self {
            n_estimators: 50,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_split: 2,
        }
    }
}

/// Binomial-deviance gradient boosting: trees are split on squared error of
/// the residuals and their leaves hold one Newton step each. Starts from
/// the prior log-odds of the training labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    params: GradientBoostingParams,
    ensemble: Option<BoostedTrees>,
}

impl GradientBoosting {
    pub fn new(params: GradientBoostingParams) -> Self {
        Self {
            params,
            ensemble: None,
        }
    }

    pub fn ensemble(&self) -> Option<&BoostedTrees> {
        self.ensemble.as_ref()
    }
}

impl Classifier for GradientBoosting {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        let run = BoostingRun {
            rounds: self.params.n_estimators,
            learning_rate: self.params.learning_rate,
            base_margin: prior_log_odds(y),
            tree: TreeParams {
                max_depth: Some(self.params.max_depth),
                min_samples_split: self.params.min_samples_split,
                max_features: None,
            },
            criterion: &VarianceSplitCriterion::new(),
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
