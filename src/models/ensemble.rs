//! Weighted-vote ensemble
//!
//! Fixed-coefficient blend of two classifiers' probabilities, thresholded
//! to a binary decision. The threshold defaults to 0.5 and can be tuned by
//! brute-force grid search over holdout accuracy.

use super::ModelError;
use ndarray::Array1;
use tracing::debug;

/// Two-member weighted probability blend.
#[derive(Debug, Clone)]
pub struct WeightedEnsemble {
    /// Weight of the primary member
    weight_primary: f64,
    /// Weight of the secondary member
    weight_secondary: f64,
    /// Decision threshold on the blended probability
    threshold: f64,
}

impl WeightedEnsemble {
    /// The pipeline's fixed blend: weights (2, 1), threshold 0.5.
    pub fn new() -> Self {
        Self {
            weight_primary: 2.0,
            weight_secondary: 1.0,
            threshold: 0.5,
        }
    }

    pub fn with_weights(mut self, primary: f64, secondary: f64) -> Self {
        self.weight_primary = primary;
        self.weight_secondary = secondary;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Weighted mean of the two probability vectors.
    pub fn blend(
        &self,
        primary: &Array1<f64>,
        secondary: &Array1<f64>,
    ) -> Result<Array1<f64>, ModelError> {
        if primary.len() != secondary.len() {
            return Err(ModelError::DimensionMismatch {
                expected: primary.len(),
                got: secondary.len(),
            });
        }

        let total = self.weight_primary + self.weight_secondary;
        Ok((primary * self.weight_primary + secondary * self.weight_secondary) / total)
    }

    /// Threshold probabilities to binary labels.
    pub fn classify(&self, proba: &Array1<f64>) -> Array1<f64> {
        proba.mapv(|p| if p >= self.threshold { 1.0 } else { 0.0 })
    }

    /// Brute-force threshold search over [0.3, 0.7] step 0.01, maximizing
    /// accuracy against the given labels. Ties keep the lowest threshold.
    /// The winning threshold is stored and returned.
    pub fn tune_threshold(&mut self, proba: &Array1<f64>, labels: &Array1<f64>) -> f64 {
        let mut best_threshold = self.threshold;
        let mut best_accuracy = -1.0;

        for step in 30..=70 {
            let threshold = step as f64 / 100.0;
            let correct = proba
                .iter()
                .zip(labels.iter())
                .filter(|(&p, &y)| {
                    let predicted = if p >= threshold { 1.0 } else { 0.0 };
                    predicted == y
                })
                .count();
            let accuracy = correct as f64 / labels.len().max(1) as f64;

            if accuracy > best_accuracy {
                best_accuracy = accuracy;
                best_threshold = threshold;
            }
        }

        debug!(threshold = best_threshold, accuracy = best_accuracy, "threshold tuned");
        self.threshold = best_threshold;
        best_threshold
    }
}

impl Default for WeightedEnsemble {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let ensemble = WeightedEnsemble::new();

        let blended = ensemble
            .blend(&Array1::from_vec(vec![0.9]), &Array1::from_vec(vec![0.3]))
            .unwrap();
        assert!((blended[0] - 0.7).abs() < 1e-12);

        let labels = ensemble.classify(&blended);
        assert_eq!(labels[0], 1.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let ensemble = WeightedEnsemble::new();

        let result = ensemble.blend(
            &Array1::from_vec(vec![0.5, 0.5]),
            &Array1::from_vec(vec![0.5]),
        );
        assert!(matches!(result, Err(ModelError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let ensemble = WeightedEnsemble::new().with_threshold(0.5);
        let labels = ensemble.classify(&Array1::from_vec(vec![0.5, 0.499]));

        assert_eq!(labels.to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_tune_threshold_finds_separator() {
        // probabilities separate the classes at 0.6, not 0.5
        let proba = Array1::from_vec(vec![0.35, 0.45, 0.55, 0.65, 0.7, 0.75]);
        let labels = Array1::from_vec(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        let mut ensemble = WeightedEnsemble::new();
        let threshold = ensemble.tune_threshold(&proba, &labels);

        assert!(threshold > 0.55 && threshold <= 0.65);
        let predicted = ensemble.classify(&proba);
        assert_eq!(predicted.to_vec(), labels.to_vec());
    }

    #[test]
    fn test_tune_stays_in_grid() {
        let proba = Array1::from_vec(vec![0.1, 0.9]);
        let labels = Array1::from_vec(vec![0.0, 1.0]);

        let mut ensemble = WeightedEnsemble::new();
        let threshold = ensemble.tune_threshold(&proba, &labels);

        assert!((0.3..=0.7).contains(&threshold));
    }
}
