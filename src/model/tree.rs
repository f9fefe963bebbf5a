//! CART regression tree with squared-error splits

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Matrix, ModelError, Regressor};

/// Tree node
#[derive(Debug, Clone)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf { value: f64, n_samples: usize },
    /// Internal node: samples with `x[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
    },
}

/// Hyperparameters shared by single trees and tree ensembles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Number of features examined per split; `None` means all
    pub max_features: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

/// Best split candidate for a node
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

/// Regression tree. Splits minimize the summed squared error of the children.
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    params: TreeParams,
    seed: u64,
    root: Option<TreeNode>,
    n_features: usize,
}

impl DecisionTreeRegressor {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            seed: 0,
            root: None,
            n_features: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit on a subset of rows. `indices` may contain duplicates (bootstrap samples).
    pub fn fit_indices(
        &mut self,
        x: &Matrix,
        y: &[f64],
        indices: &[usize],
    ) -> Result<(), ModelError> {
        if indices.is_empty() {
            return Err(ModelError::EmptyInput {
                model: "DecisionTreeRegressor",
            });
        }
        if y.len() != x.nrows() {
            return Err(ModelError::ShapeMismatch {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }
        if self.params.min_samples_split < 2 || self.params.min_samples_leaf < 1 {
            return Err(ModelError::InvalidParameter {
                model: "DecisionTreeRegressor",
                message: "min_samples_split must be >= 2 and min_samples_leaf >= 1".to_string(),
            });
        }

        self.n_features = x.ncols();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut work = indices.to_vec();
        self.root = Some(self.build(x, y, &mut work, 0, &mut rng));
        Ok(())
    }

    fn build(
        &self,
        x: &Matrix,
        y: &[f64],
        indices: &mut [usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n_samples = indices.len();
        let value = mean_of(y, indices);

        let depth_reached = self.params.max_depth.is_some_and(|d| depth >= d);
        if depth_reached
            || n_samples < self.params.min_samples_split
            || n_samples < 2 * self.params.min_samples_leaf
            || is_constant(y, indices)
        {
            return TreeNode::Leaf { value, n_samples };
        }

        let Some(split) = self.find_best_split(x, y, indices, rng) else {
            return TreeNode::Leaf { value, n_samples };
        };

        // Partition in place: left block first
        let mut boundary = 0;
        for k in 0..indices.len() {
            if x[(indices[k], split.feature)] <= split.threshold {
                indices.swap(k, boundary);
                boundary += 1;
            }
        }
        let (left_idx, right_idx) = indices.split_at_mut(boundary);

        let left = Box::new(self.build(x, y, left_idx, depth + 1, rng));
        let right = Box::new(self.build(x, y, right_idx, depth + 1, rng));

        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
            n_samples,
        }
    }

    fn candidate_features(&self, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        match self.params.max_features {
            Some(k) if k < self.n_features => {
                features.shuffle(rng);
                features.truncate(k.max(1));
                features
            }
            _ => features,
        }
    }

    /// Scan each candidate feature in sorted order with running sums.
    /// Score is `S_l²/n_l + S_r²/n_r`; maximizing it minimizes child SSE.
    fn find_best_split(
        &self,
        x: &Matrix,
        y: &[f64],
        indices: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let total_sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let parent_score = total_sum * total_sum / n as f64;
        let min_leaf = self.params.min_samples_leaf;

        let mut best: Option<SplitCandidate> = None;
        let mut order: Vec<usize> = indices.to_vec();

        for feature in self.candidate_features(rng) {
            order.sort_by(|&a, &b| {
                x[(a, feature)]
                    .partial_cmp(&x[(b, feature)])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left_sum = 0.0;
            for k in 0..n - 1 {
                left_sum += y[order[k]];
                let left_n = k + 1;
                let right_n = n - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }
                let current = x[(order[k], feature)];
                let next = x[(order[k + 1], feature)];
                if next <= current {
                    continue;
                }
                let right_sum = total_sum - left_sum;
                let score = left_sum * left_sum / left_n as f64
                    + right_sum * right_sum / right_n as f64;

                let improves = best
                    .as_ref()
                    .map_or(score > parent_score + 1e-12, |b| score > b.score);
                if improves {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: current + (next - current) / 2.0,
                        score,
                    });
                }
            }
        }

        best
    }

    fn predict_row(&self, node: &TreeNode, row: &[f64]) -> f64 {
        match node {
            TreeNode::Leaf { value, .. } => *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                if row[*feature] <= *threshold {
                    self.predict_row(left, row)
                } else {
                    self.predict_row(right, row)
                }
            }
        }
    }

    /// Depth of the fitted tree (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        self.root.as_ref().map_or(0, node_depth)
    }

    pub fn n_leaves(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => count(left) + count(right),
            }
        }
        self.root.as_ref().map_or(0, count)
    }
}

impl Regressor for DecisionTreeRegressor {
    fn name(&self) -> &'static str {
        "DecisionTreeRegressor"
    }

    fn fit(&mut self, x: &Matrix, y: &[f64]) -> Result<(), ModelError> {
        let indices: Vec<usize> = (0..x.nrows()).collect();
        self.fit_indices(x, y, &indices)
    }

    fn predict(&self, x: &Matrix) -> Result<Vec<f64>, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted {
            model: self.name(),
        })?;
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok((0..x.nrows())
            .map(|i| self.predict_row(root, x.row(i)))
            .collect())
    }
}

fn mean_of(y: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

fn is_constant(y: &[f64], indices: &[usize]) -> bool {
    let first = y[indices[0]];
    indices.iter().all(|&i| (y[i] - first).abs() < 1e-12)
}
