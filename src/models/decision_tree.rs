//! Gini decision tree for binary classification
//!
//! Recursive splitter over midpoint thresholds with optional per-node
//! feature subsampling; leaves carry the positive-class fraction.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tree growth parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth
    pub max_depth: usize,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per node (None = all)
    pub max_features: Option<usize>,
    /// Seed for the feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// One tree node; leaves have no children and carry `probability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature_idx: Option<usize>,
    pub threshold: Option<f64>,
    /// Positive-class fraction of the samples in this node
    pub probability: f64,
    pub n_samples: usize,
    pub impurity: f64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(probability: f64, n_samples: usize, impurity: f64) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            probability,
            n_samples,
            impurity,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            1 + self
                .left
                .as_ref()
                .map(|n| n.depth())
                .unwrap_or(0)
                .max(self.right.as_ref().map(|n| n.depth()).unwrap_or(0))
        }
    }
}

/// Binary classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            feature_importances: Vec::new(),
        }
    }

    /// Fit on dense rows and binary labels.
    pub fn fit(&mut self, rows: &[Vec<f64>], labels: &[f64]) {
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        self.feature_importances = vec![0.0; n_features];

        let indices: Vec<usize> = (0..rows.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        self.root = Some(self.build(rows, labels, &indices, 0, &mut rng));

        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for importance in &mut self.feature_importances {
                *importance /= sum;
            }
        }
    }

    fn build(
        &mut self,
        rows: &[Vec<f64>],
        labels: &[f64],
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        let probability = Self::positive_fraction(labels, indices);
        let impurity = Self::gini(probability);

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(probability, n, impurity);
        }

        match self.find_best_split(rows, labels, indices, impurity, rng) {
            Some(split) => {
                if split.left.len() < self.config.min_samples_leaf
                    || split.right.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(probability, n, impurity);
                }

                self.feature_importances[split.feature_idx] += split.gain * n as f64;

                let left = self.build(rows, labels, &split.left, depth + 1, rng);
                let right = self.build(rows, labels, &split.right, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(split.feature_idx),
                    threshold: Some(split.threshold),
                    probability,
                    n_samples: n,
                    impurity,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(probability, n, impurity),
        }
    }

    fn find_best_split(
        &self,
        rows: &[Vec<f64>],
        labels: &[f64],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best: Option<BestSplit> = None;
        let mut best_gain = 0.0;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices.iter().map(|&i| rows[i][feature_idx]).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| rows[i][feature_idx] <= threshold);

                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let left_impurity = Self::gini(Self::positive_fraction(labels, &left));
                let right_impurity = Self::gini(Self::positive_fraction(labels, &right));

                let n_left = left.len() as f64;
                let n_right = right.len() as f64;
                let weighted =
                    (n_left * left_impurity + n_right * right_impurity) / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(BestSplit {
                        feature_idx,
                        threshold,
                        left,
                        right,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Positive-class probability for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> f64 {
        match &self.root {
            Some(root) => {
                let mut node = root;
                while !node.is_leaf() {
                    let feature_idx = node.feature_idx.expect("split node has a feature");
                    let threshold = node.threshold.expect("split node has a threshold");
                    node = if features[feature_idx] <= threshold {
                        node.left.as_ref().expect("split node has a left child")
                    } else {
                        node.right.as_ref().expect("split node has a right child")
                    };
                }
                node.probability
            }
            None => 0.5,
        }
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    fn positive_fraction(labels: &[f64], indices: &[usize]) -> f64 {
        if indices.is_empty() {
            return 0.5;
        }
        let positive = indices.iter().filter(|&&i| labels[i] > 0.5).count();
        positive as f64 / indices.len() as f64
    }

    fn gini(p: f64) -> f64 {
        2.0 * p * (1.0 - p)
    }
}

struct BestSplit {
    feature_idx: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
    gain: f64,
}
