//! Classifiers and the weighted ensemble
//!
//! Every estimator sits behind the [`Classifier`] trait so the pipeline can
//! swap implementations without changing a call site.

pub mod decision_tree;
pub mod ensemble;
pub mod logistic;
pub mod naive_bayes;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use ensemble::WeightedEnsemble;
pub use logistic::{LogisticRegression, Regularization};
pub use naive_bayes::GaussianNaiveBayes;
pub use random_forest::{ForestConfig, RandomForest};

use ndarray::{Array1, Array2};
use thiserror::Error;

/// Errors shared by the estimators.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model has not been fitted yet")]
    NotFitted,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("empty training set")]
    EmptyTrainingSet,

    #[error("training set contains a single class")]
    SingleClass,
}

/// Binary probabilistic classifier: fit once, then predict positive-class
/// probabilities as a pure function of the input rows.
pub trait Classifier {
    /// Short name used in logs and output file names.
    fn name(&self) -> &'static str;

    /// Fit on a feature matrix and binary labels (0.0 / 1.0).
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError>;

    /// Positive-class probability per row, each in [0, 1].
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError>;
}

pub(crate) fn check_fit_input(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
    if x.nrows() == 0 {
        return Err(ModelError::EmptyTrainingSet);
    }
    if x.nrows() != y.len() {
        return Err(ModelError::DimensionMismatch {
            expected: x.nrows(),
            got: y.len(),
        });
    }
    Ok(())
}
