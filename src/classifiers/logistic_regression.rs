use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifiers::Classifier;
use crate::classifiers::classifier::{check_row_width, check_training_data, normalize, sigmoid};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LogisticRegressionParams {
    /// Inverse L2 regularisation strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the largest Newton step falls below this
    pub tol: f64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// L2-regularised logistic regression fitted by Newton-Raphson (IRLS).
///
/// Minimises `sum(logloss) + ||w||² / (2C)`; the intercept is not penalised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    coefficients: Vec<f64>,
    intercept: f64,
    n_iter: usize,
}

impl LogisticRegression {
    pub fn new(params: LogisticRegressionParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    fn objective(x: ArrayView2<f64>, y: &[f64], w: &Array1<f64>, penalty: f64) -> f64 {
        let d = x.ncols();
        let mut loss = 0.0;
        for (row, &t) in x.rows().into_iter().zip(y) {
            let z = row.dot(&w.slice(ndarray::s![..d])) + w[d];
            // log(1 + e^z) - t*z, stable for large |z|
            loss += z.max(0.0) + (-z.abs()).exp().ln_1p() - t * z;
        }
        let reg: f64 = w.iter().take(d).map(|v| v * v).sum();
        loss + 0.5 * penalty * reg
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: ArrayView2<f64>, y: &[u8]) -> Result<()> {
        check_training_data(x, y)?;
        if self.params.c <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "C must be positive, got {}",
                self.params.c
            )));
        }

        let d = x.ncols();
        let penalty = 1.0 / self.params.c;
        let targets: Vec<f64> = y.iter().map(|&l| f64::from(l)).collect();
        // weights followed by the intercept
        let mut w = Array1::<f64>::zeros(d + 1);
        let mut objective = Self::objective(x, &targets, &w, penalty);
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..self.params.max_iter {
            iterations = iter + 1;
            let mut grad = Array1::<f64>::zeros(d + 1);
            let mut hess = Array2::<f64>::zeros((d + 1, d + 1));

            for (row, &t) in x.rows().into_iter().zip(&targets) {
                let z = row.dot(&w.slice(ndarray::s![..d])) + w[d];
                let p = sigmoid(z);
                let r = p - t;
                let s = p * (1.0 - p);
                for j in 0..d {
                    grad[j] += r * row[j];
                    for k in 0..=j {
                        hess[[j, k]] += s * row[j] * row[k];
                    }
                    hess[[d, j]] += s * row[j];
                }
                grad[d] += r;
                hess[[d, d]] += s;
            }
            for j in 0..d {
                grad[j] += penalty * w[j];
                hess[[j, j]] += penalty;
            }
            for j in 0..=d {
                for k in 0..j {
                    hess[[k, j]] = hess[[j, k]];
                }
            }

            let Some(step) = solve(hess, grad) else {
                warn!("Logistic regression Hessian is singular, stopping after {iter} iterations");
                break;
            };

            // backtracking keeps each Newton step a descent step
            let mut scale = 1.0;
            let mut candidate = &w - &step;
            let mut candidate_objective = Self::objective(x, &targets, &candidate, penalty);
            while candidate_objective > objective && scale > 1e-8 {
                scale *= 0.5;
                candidate = &w - &(&step * scale);
                candidate_objective = Self::objective(x, &targets, &candidate, penalty);
            }

            let max_step = step.iter().fold(0.0f64, |m, v| m.max((v * scale).abs()));
            w = candidate;
            objective = candidate_objective;
            if max_step < self.params.tol {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "Logistic regression did not converge in {} iterations",
                self.params.max_iter
            );
        }
        debug!("Logistic regression fitted in {iterations} iterations, objective {objective:.4}");

        self.coefficients = w.iter().take(d).copied().collect();
        self.intercept = w[d];
        self.n_iter = iterations;
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<f64>) -> Result<f64> {
        check_row_width(self.coefficients.len(), row)?;
        let z: f64 = row
            .iter()
            .zip(&self.coefficients)
            .map(|(v, c)| v * c)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }

    /// Normalised absolute coefficients.
    fn feature_importances(&self) -> Option<Vec<f64>> {
        if self.coefficients.is_empty() {
            return None;
        }
        Some(normalize(self.coefficients.iter().map(|c| c.abs()).collect()))
    }
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        if a[[pivot, col]].abs() < 1e-12 {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }
        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Some(x)
}
