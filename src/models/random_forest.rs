//! Random forest of gini trees
//!
//! Seeded bootstrap sampling per tree, sqrt-feature subsampling, trees
//! built in parallel. Probability is the fraction of trees voting for the
//! positive class.

use super::decision_tree::{DecisionTree, TreeConfig};
use super::{check_fit_input, Classifier, ModelError};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Forest parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Trees in the forest
    pub n_trees: usize,
    /// Maximum depth per tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Features per node (None = sqrt of total)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Base seed; tree i uses seed + i
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: 12,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random forest classifier.
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }

    /// Positive-vote fraction for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }

        let votes = self
            .trees
            .iter()
            .filter(|tree| tree.predict_proba_one(features) > 0.5)
            .count();

        votes as f64 / self.trees.len() as f64
    }

    /// Mean per-tree importance, normalized.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Importances paired with names, highest first.
    pub fn importance_ranking<'a>(&'a self, names: &'a [String]) -> Vec<(&'a str, f64)> {
        let mut ranking: Vec<(&str, f64)> = names
            .iter()
            .zip(self.feature_importances.iter())
            .map(|(name, &importance)| (name.as_str(), importance))
            .collect();
        ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranking
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        check_fit_input(x, y)?;

        let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
        let labels: Vec<f64> = y.to_vec();

        let n_samples = rows.len();
        let n_features = x.ncols();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize);

        self.trees = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_seed = self.config.seed.wrapping_add(i as u64);
                let mut tree = DecisionTree::new(TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: tree_seed,
                });

                if self.config.bootstrap {
                    let indices = Self::bootstrap_indices(n_samples, tree_seed);
                    let sample_rows: Vec<Vec<f64>> =
                        indices.iter().map(|&j| rows[j].clone()).collect();
                    let sample_labels: Vec<f64> = indices.iter().map(|&j| labels[j]).collect();
                    tree.fit(&sample_rows, &sample_labels);
                } else {
                    tree.fit(&rows, &labels);
                }

                tree
            })
            .collect();

        self.feature_importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (slot, &importance) in self
                .feature_importances
                .iter_mut()
                .zip(tree.feature_importances())
            {
                *slot += importance;
            }
        }
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for importance in &mut self.feature_importances {
                *importance /= sum;
            }
        }

        debug!(trees = self.trees.len(), max_features, "forest fitted");
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
        let proba: Vec<f64> = rows
            .par_iter()
            .map(|row| self.predict_proba_one(row))
            .collect();

        Ok(Array1::from_vec(proba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 1), |(i, _)| i as f64 / 10.0);
        let y = Array1::from_shape_fn(n, |i| if i >= n / 2 { 1.0 } else { 0.0 });
        (x, y)
    }

    #[test]
    fn test_forest_classification() {
        let (x, y) = step_data(200);

        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 20,
            max_depth: 5,
            ..Default::default()
        });
        forest.fit(&x, &y).unwrap();

        let proba = forest.predict_proba(&x).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[199] > 0.5);
        assert_eq!(forest.n_trees(), 20);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let (x, y) = step_data(100);

        let config = ForestConfig {
            n_trees: 10,
            seed: 7,
            ..Default::default()
        };
        let mut a = RandomForest::new(config.clone());
        let mut b = RandomForest::new(config);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        assert_eq!(
            a.predict_proba(&x).unwrap(),
            b.predict_proba(&x).unwrap()
        );
    }

    #[test]
    fn test_unfitted_is_an_error() {
        let forest = RandomForest::default();
        let x = Array2::zeros((1, 1));

        assert!(matches!(
            forest.predict_proba(&x),
            Err(ModelError::NotFitted)
        ));
    }
}
