//! Gaussian naive Bayes
//!
//! Class-conditional Gaussian likelihood per feature, accumulated in log
//! space and normalized with a stable two-class softmax. Each class
//! variance is smoothed by a fraction of that feature's overall variance so
//! a column that is constant within one class (common for rare term counts)
//! does not collapse the density.

use super::{check_fit_input, Classifier, ModelError};
use ndarray::{Array1, Array2, Axis};

#[derive(Debug, Clone)]
struct ClassStats {
    log_prior: f64,
    means: Array1<f64>,
    variances: Array1<f64>,
}

/// Gaussian naive Bayes classifier for binary labels.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    /// Fraction of each feature's overall variance added to the class
    /// variances
    var_smoothing: f64,
    /// Per-class statistics, index 0 = negative, 1 = positive
    fitted: Option<[ClassStats; 2]>,
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        Self {
            var_smoothing: 0.1,
            fitted: None,
        }
    }

    pub fn with_var_smoothing(mut self, smoothing: f64) -> Self {
        self.var_smoothing = smoothing;
        self
    }

    fn class_stats(x: &Array2<f64>, rows: &[usize], log_prior: f64) -> ClassStats {
        let n = rows.len() as f64;
        let n_features = x.ncols();

        let mut means = Array1::<f64>::zeros(n_features);
        for &i in rows {
            means = &means + &x.row(i);
        }
        means /= n;

        let mut variances = Array1::<f64>::zeros(n_features);
        for &i in rows {
            let diff = &x.row(i) - &means;
            variances = &variances + &diff.mapv(|d| d * d);
        }
        variances /= n;

        ClassStats {
            log_prior,
            means,
            variances,
        }
    }

    fn log_likelihood(stats: &ClassStats, row: &Array1<f64>) -> f64 {
        let mut total = stats.log_prior;
        for ((&value, &mean), &variance) in row
            .iter()
            .zip(stats.means.iter())
            .zip(stats.variances.iter())
        {
            let diff = value - mean;
            total += -0.5 * ((2.0 * std::f64::consts::PI * variance).ln() + diff * diff / variance);
        }
        total
    }
}

impl Default for GaussianNaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn name(&self) -> &'static str {
        "naive_bayes"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        check_fit_input(x, y)?;

        let negative: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, &label)| label <= 0.5)
            .map(|(i, _)| i)
            .collect();
        let positive: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, &label)| label > 0.5)
            .map(|(i, _)| i)
            .collect();

        if negative.is_empty() || positive.is_empty() {
            return Err(ModelError::SingleClass);
        }

        let n = y.len() as f64;
        let mut stats = [
            Self::class_stats(x, &negative, (negative.len() as f64 / n).ln()),
            Self::class_stats(x, &positive, (positive.len() as f64 / n).ln()),
        ];

        // per-feature smoothing from the overall variance, with a floor for
        // columns that are constant across the whole partition
        let overall = x.var_axis(Axis(0), 0.0);
        for class in &mut stats {
            for (variance, &global) in class.variances.iter_mut().zip(overall.iter()) {
                *variance += (self.var_smoothing * global).max(1e-9);
            }
        }

        self.fitted = Some(stats);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let stats = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;

        if x.ncols() != stats[0].means.len() {
            return Err(ModelError::DimensionMismatch {
                expected: stats[0].means.len(),
                got: x.ncols(),
            });
        }

        let proba = x
            .rows()
            .into_iter()
            .map(|row| {
                let row = row.to_owned();
                let log_neg = Self::log_likelihood(&stats[0], &row);
                let log_pos = Self::log_likelihood(&stats[1], &row);
                // stable two-class softmax
                1.0 / (1.0 + (log_neg - log_pos).exp())
            })
            .collect();

        Ok(proba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                0.0, 0.1, 0.2, 0.0, 0.1, 0.2, 0.0, 0.0, 4.0, 4.1, 4.2, 4.0, 4.1, 4.2, 4.0, 3.9,
            ],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        (x, y)
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable();
        let mut model = GaussianNaiveBayes::new();
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[7] > 0.5);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_single_class_rejected() {
        let x = Array2::zeros((3, 2));
        let y = Array1::from_vec(vec![1.0, 1.0, 1.0]);

        let mut model = GaussianNaiveBayes::new();
        assert!(matches!(model.fit(&x, &y), Err(ModelError::SingleClass)));
    }

    #[test]
    fn test_constant_feature_survives() {
        // second column is constant everywhere; smoothing keeps the
        // density finite and the column uninformative
        let x = Array2::from_shape_vec((4, 2), vec![0.0, 7.0, 0.1, 7.0, 4.0, 7.0, 4.1, 7.0])
            .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 1.0, 1.0]);

        let mut model = GaussianNaiveBayes::new();
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert!(proba.iter().all(|p| p.is_finite()));
        assert!(proba[0] < 0.5 && proba[3] > 0.5);
    }

    #[test]
    fn test_class_constant_column_does_not_dominate() {
        // first column is constant within the negative class only; a test
        // value off that constant must not produce an infinite likelihood
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![2.0, 0.0, 2.0, 0.2, 2.0, 0.1, 5.0, 4.0, 6.0, 4.1, 7.0, 4.2],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        let mut model = GaussianNaiveBayes::new();
        model.fit(&x, &y).unwrap();

        let query = Array2::from_shape_vec((1, 2), vec![2.5, 0.1]).unwrap();
        let proba = model.predict_proba(&query).unwrap();

        assert!(proba[0].is_finite());
        assert!(proba[0] < 0.5);
    }
}
