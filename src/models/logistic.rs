//! Logistic regression for binary classification
//!
//! Gradient descent on the log loss with optional L1/L2 penalties.
//! Features are z-scored internally during `fit` (raw counts and character
//! lengths sit on very different scales) and the same statistics are
//! applied at prediction time.

use super::{check_fit_input, Classifier, ModelError};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

/// Penalty applied to the coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regularization {
    None,
    /// L1 (Lasso) with strength alpha
    L1(f64),
    /// L2 (Ridge) with strength alpha
    L2(f64),
}

/// Logistic regression classifier.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Fitted coefficients, on the standardized scale
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept
    pub intercept: Option<f64>,
    /// Per-feature means captured at fit time
    feature_means: Option<Array1<f64>>,
    /// Per-feature standard deviations captured at fit time
    feature_stds: Option<Array1<f64>>,
    learning_rate: f64,
    max_iter: usize,
    tolerance: f64,
    regularization: Regularization,
    /// Log-loss per iteration of the last fit
    pub cost_history: Vec<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(0.05, 2000, 1e-7, Regularization::None)
    }
}

impl LogisticRegression {
    pub fn new(
        learning_rate: f64,
        max_iter: usize,
        tolerance: f64,
        regularization: Regularization,
    ) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            feature_means: None,
            feature_stds: None,
            learning_rate,
            max_iter,
            tolerance,
            regularization,
            cost_history: Vec::new(),
        }
    }

    /// L2-regularized model with inverse strength `c`, sklearn-style.
    pub fn with_l2(c: f64) -> Self {
        Self::new(0.05, 2000, 1e-7, Regularization::L2(1.0 / c))
    }

    /// Numerically stable sigmoid.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    fn sigmoid_array(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(Self::sigmoid)
    }

    /// Binary cross-entropy.
    fn log_loss(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let eps = 1e-15;
        let n = y_true.len() as f64;

        -y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&y, &p)| {
                let p = p.clamp(eps, 1.0 - eps);
                y * p.ln() + (1.0 - y) * (1.0 - p).ln()
            })
            .sum::<f64>()
            / n
    }

    /// Z-score with the given statistics; constant features pass through.
    fn standardize(x: &Array2<f64>, means: &Array1<f64>, stds: &Array1<f64>) -> Array2<f64> {
        let mut scaled = x.clone();
        for mut row in scaled.rows_mut() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - means[j]) / stds[j];
            }
        }
        scaled
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &'static str {
        "logistic"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        check_fit_input(x, y)?;

        let means = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyTrainingSet)?;
        let stds = x
            .var_axis(Axis(0), 0.0)
            .mapv(|v| if v.sqrt() > 1e-10 { v.sqrt() } else { 1.0 });
        let x = Self::standardize(x, &means, &stds);

        let n_samples = x.nrows() as f64;
        let n_features = x.ncols();

        let mut weights = Array1::<f64>::zeros(n_features);
        let mut bias = 0.0;

        self.cost_history.clear();

        for iter in 0..self.max_iter {
            let linear = x.dot(&weights) + bias;
            let predictions = Self::sigmoid_array(&linear);

            let errors = &predictions - y;
            let mut dw = x.t().dot(&errors) / n_samples;
            let db = errors.sum() / n_samples;

            match self.regularization {
                Regularization::L2(alpha) => {
                    dw = &dw + &(&weights * alpha);
                }
                Regularization::L1(alpha) => {
                    let sign = weights.mapv(f64::signum);
                    dw = &dw + &(&sign * alpha);
                }
                Regularization::None => {}
            }

            weights = &weights - &(&dw * self.learning_rate);
            bias -= self.learning_rate * db;

            let cost = Self::log_loss(y, &predictions);
            self.cost_history.push(cost);

            if iter > 0 {
                let cost_diff = (self.cost_history[iter - 1] - cost).abs();
                if cost_diff < self.tolerance {
                    debug!(iteration = iter, cost, "logistic regression converged");
                    break;
                }
            }
        }

        self.coefficients = Some(weights);
        self.intercept = Some(bias);
        self.feature_means = Some(means);
        self.feature_stds = Some(stds);

        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let weights = self.coefficients.as_ref().ok_or(ModelError::NotFitted)?;
        let bias = self.intercept.ok_or(ModelError::NotFitted)?;
        let means = self.feature_means.as_ref().ok_or(ModelError::NotFitted)?;
        let stds = self.feature_stds.as_ref().ok_or(ModelError::NotFitted)?;

        if x.ncols() != weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: weights.len(),
                got: x.ncols(),
            });
        }

        let x = Self::standardize(x, means, stds);
        let linear = x.dot(weights) + bias;
        Ok(Self::sigmoid_array(&linear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0, 5.0, 5.0, 5.5, 5.5, 6.0, 6.0],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        (x, y)
    }

    #[test]
    fn test_sigmoid() {
        assert!((LogisticRegression::sigmoid(0.0) - 0.5).abs() < 1e-10);
        assert!(LogisticRegression::sigmoid(100.0) > 0.99);
        assert!(LogisticRegression::sigmoid(-100.0) < 0.01);
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable();

        let mut model = LogisticRegression::new(0.5, 2000, 1e-9, Regularization::None);
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[5] > 0.5);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_unscaled_features_still_converge() {
        // same geometry, one feature inflated by 100x
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![0.0, 0.0, 50.0, 0.5, 100.0, 1.0, 500.0, 5.0, 550.0, 5.5, 600.0, 6.0],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        let mut model = LogisticRegression::with_l2(1.0);
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[5] > 0.5);
    }

    #[test]
    fn test_l2_shrinks_coefficients() {
        let (x, y) = separable();

        let mut plain = LogisticRegression::new(0.5, 2000, 1e-9, Regularization::None);
        plain.fit(&x, &y).unwrap();
        let mut ridge = LogisticRegression::new(0.5, 2000, 1e-9, Regularization::L2(1.0));
        ridge.fit(&x, &y).unwrap();

        let norm = |m: &LogisticRegression| -> f64 {
            m.coefficients
                .as_ref()
                .unwrap()
                .iter()
                .map(|c| c * c)
                .sum::<f64>()
                .sqrt()
        };

        assert!(norm(&ridge) < norm(&plain));
    }

    #[test]
    fn test_unfitted_is_an_error() {
        let model = LogisticRegression::default();
        let x = Array2::zeros((1, 2));

        assert!(matches!(
            model.predict_proba(&x),
            Err(ModelError::NotFitted)
        ));
    }

    #[test]
    fn test_feature_count_checked() {
        let x = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        let y = Array1::from_vec(vec![0.0, 1.0]);

        let mut model = LogisticRegression::default();
        model.fit(&x, &y).unwrap();

        let wide = Array2::zeros((1, 3));
        assert!(matches!(
            model.predict_proba(&wide),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }
}
