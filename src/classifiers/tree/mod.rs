//! Binary CART trees grown by exact greedy split search.
//!
//! A tree is grown on per-sample gradient `g` and hessian `h` values, and a
//! [`SplitCriterion`] decides both how candidate splits are scored and what a
//! leaf predicts. The same builder therefore serves random-forest members
//! (`g = y`, `h = 1`), first-order boosting stages and second-order boosting
//! rounds.

mod split_criteria;
mod split_suggestion;

use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub use split_criteria::{
    GiniSplitCriterion, SecondOrderSplitCriterion, SplitCriterion, VarianceSplitCriterion,
};
pub use split_suggestion::SplitSuggestion;

/// Values closer than this are treated as equal when placing thresholds.
const FEATURE_TOLERANCE: f64 = 1e-7;
/// Splits must improve the criterion by more than this.
const MIN_MERIT: f64 = 1e-12;

/// Sufficient statistics of the samples reaching a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStats {
    pub count: usize,
    pub sum_g: f64,
    pub sum_h: f64,
}

impl NodeStats {
    pub fn of(samples: &[usize], grad: &[f64], hess: &[f64]) -> Self {
        let mut stats = Self::default();
        for &i in samples {
            stats.add(grad[i], hess[i]);
        }
        stats
    }

    #[inline]
    pub fn add(&mut self, g: f64, h: f64) {
        self.count += 1;
        self.sum_g += g;
        self.sum_h += h;
    }

    pub fn merged(&self, other: &NodeStats) -> NodeStats {
        NodeStats {
            count: self.count + other.count,
            sum_g: self.sum_g + other.sum_g,
            sum_h: self.sum_h + other.sum_h,
        }
    }

    fn minus(&self, other: &NodeStats) -> NodeStats {
        NodeStats {
            count: self.count.saturating_sub(other.count),
            sum_g: self.sum_g - other.sum_g,
            sum_h: self.sum_h - other.sum_h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// `None` grows until leaves are pure or unsplittable
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features examined per split; `None` examines all of them
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

/// Fitted tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

/// Borrowed training inputs for one tree. `grad` and `hess` may be
/// rewritten between trees while `x` stays borrowed.
pub struct GrowthData<'x, 's> {
    pub x: ArrayView2<'x, f64>,
    pub grad: &'s [f64],
    pub hess: &'s [f64],
}

impl DecisionTree {
    /// Grows a tree over `samples` (row indices, repeats allowed) and adds
    /// each split's merit to `importances[feature]`.
    pub fn grow<C, R>(
        data: &GrowthData<'_, '_>,
        samples: Vec<usize>,
        criterion: &C,
        params: &TreeParams,
        rng: &mut R,
        importances: &mut [f64],
    ) -> Self
    where
        C: SplitCriterion + ?Sized,
        R: Rng + ?Sized,
    {
        let mut nodes = vec![TreeNode::Leaf { value: 0.0 }];
        let mut pending = vec![(0usize, samples, 0usize)];

        while let Some((index, samples, depth)) = pending.pop() {
            let stats = NodeStats::of(&samples, data.grad, data.hess);
            let leaf = TreeNode::Leaf {
                value: criterion.leaf_value(&stats),
            };

            let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
            if depth_reached || samples.len() < params.min_samples_split.max(2) {
                nodes[index] = leaf;
                continue;
            }

            let Some(best) = best_split(data, &samples, &stats, criterion, params.max_features, rng)
            else {
                nodes[index] = leaf;
                continue;
            };

            if let Some(slot) = importances.get_mut(best.feature) {
                *slot += best.merit;
            }

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&i| data.x[[i, best.feature]] <= best.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(TreeNode::Leaf { value: 0.0 });
            nodes.push(TreeNode::Leaf { value: 0.0 });
            nodes[index] = TreeNode::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };
            pending.push((right, right_samples, depth + 1));
            pending.push((left, left_samples, depth + 1));
        }

        Self { nodes }
    }

    pub fn predict_value(&self, row: ArrayView1<f64>) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = row.get(*feature).copied().unwrap_or(0.0);
                    index = if v <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], index: usize) -> usize {
            match nodes.get(index) {
                Some(TreeNode::Split { left, right, .. }) => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

fn best_split<C, R>(
    data: &GrowthData<'_, '_>,
    samples: &[usize],
    total: &NodeStats,
    criterion: &C,
    max_features: Option<usize>,
    rng: &mut R,
) -> Option<SplitSuggestion>
where
    C: SplitCriterion + ?Sized,
    R: Rng + ?Sized,
{
    let n_features = data.x.ncols();
    let mut features: Vec<usize> = (0..n_features).collect();
    let budget = match max_features {
        Some(k) => {
            features.shuffle(rng);
            k.clamp(1, n_features.max(1))
        }
        None => n_features,
    };

    let mut best: Option<SplitSuggestion> = None;
    let mut examined = 0;
    let mut column: Vec<(f64, usize)> = Vec::with_capacity(samples.len());

    for &feature in &features {
        if examined >= budget {
            break;
        }
        column.clear();
        column.extend(samples.iter().map(|&i| (data.x[[i, feature]], i)));
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (Some(first), Some(last)) = (column.first(), column.last()) else {
            continue;
        };
        // constant features do not count against the budget
        if last.0 - first.0 <= FEATURE_TOLERANCE {
            continue;
        }
        examined += 1;

        let mut left = NodeStats::default();
        for pair in column.windows(2) {
            let (value, i) = pair[0];
            let next = pair[1].0;
            left.add(data.grad[i], data.hess[i]);
            if next - value <= FEATURE_TOLERANCE {
                continue;
            }
            let right = total.minus(&left);
            let Some(merit) = criterion.merit_of_split(total, &left, &right) else {
                continue;
            };
            if merit > MIN_MERIT && best.is_none_or(|b| merit > b.merit) {
                let mut threshold = value + (next - value) / 2.0;
                if threshold >= next {
                    threshold = value;
                }
                best = Some(SplitSuggestion {
                    feature,
                    threshold,
                    merit,
                    left,
                    right,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grow_gini(x: &Array2<f64>, y: &[f64], params: &TreeParams) -> (DecisionTree, Vec<f64>) {
        let ones = vec![1.0; y.len()];
        let data = GrowthData {
            x: x.view(),
            grad: y,
            hess: &ones,
        };
        let mut importances = vec![0.0; x.ncols()];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::grow(
            &data,
            (0..y.len()).collect(),
            &GiniSplitCriterion::new(),
            params,
            &mut rng,
            &mut importances,
        );
        (tree, importances)
    }

    #[test]
    fn learns_a_threshold_on_the_informative_feature() {
        let x = array![[0.0, 5.0], [1.0, 3.0], [2.0, 5.0], [3.0, 3.0]];
        let y = [0.0, 0.0, 1.0, 1.0];
        let (tree, importances) = grow_gini(&x, &y, &TreeParams::default());

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict_value(array![0.5, 3.0].view()), 0.0);
        assert_eq!(tree.predict_value(array![2.6, 5.0].view()), 1.0);
        assert!(importances[0] > 0.0);
        assert_eq!(importances[1], 0.0);
    }

    #[test]
    fn depth_limit_is_respected() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let (deep, _) = grow_gini(&x, &y, &TreeParams::default());
        assert!(deep.depth() >= 3);

        let shallow_params = TreeParams {
            max_depth: Some(1),
            ..TreeParams::default()
        };
        let (shallow, _) = grow_gini(&x, &y, &shallow_params);
        assert!(shallow.depth() <= 1);
        let p = shallow.predict_value(array![0.0].view());
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn constant_features_yield_a_single_leaf() {
        let x = array![[1.0], [1.0], [1.0]];
        let (tree, _) = grow_gini(&x, &[0.0, 1.0, 1.0], &TreeParams::default());
        assert_eq!(tree.n_nodes(), 1);
        assert!((tree.predict_value(array![1.0].view()) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn second_order_leaves_are_shrunk_newton_steps() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        // residuals y - p at p = 0.5
        let grad = [-0.5, -0.5, 0.5, 0.5];
        let hess = [0.25; 4];
        let data = GrowthData {
            x: x.view(),
            grad: &grad,
            hess: &hess,
        };
        let criterion = SecondOrderSplitCriterion {
            min_child_weight: 0.0,
            ..SecondOrderSplitCriterion::default()
        };
        let mut importances = vec![0.0];
        let tree = DecisionTree::grow(
            &data,
            vec![0, 1, 2, 3],
            &criterion,
            &TreeParams {
                max_depth: Some(1),
                ..TreeParams::default()
            },
            &mut StdRng::seed_from_u64(1),
            &mut importances,
        );
        // G/(H+λ) = 1.0 / 1.5
        let right = tree.predict_value(array![3.0].view());
        assert!((right - 1.0 / 1.5).abs() < 1e-12);
        assert!((tree.predict_value(array![0.0].view()) + 1.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_tagged_nodes() {
        let x = array![[0.0], [1.0]];
        let (tree, _) = grow_gini(&x, &[0.0, 1.0], &TreeParams::default());
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["nodes"][0]["type"], "split");
        assert_eq!(json["nodes"][1]["type"], "leaf");
        let back: DecisionTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
