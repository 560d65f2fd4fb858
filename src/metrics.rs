//! Classification metrics

use ndarray::Array1;

/// Metrics calculator for binary labels encoded as 0.0 / 1.0.
pub struct Metrics;

impl Metrics {
    /// (correct predictions) / (total predictions)
    pub fn accuracy(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "arrays must have same length");

        if y_true.is_empty() {
            return 0.0;
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| (*t - *p).abs() < 1e-10)
            .count();

        correct as f64 / y_true.len() as f64
    }

    /// TP / (TP + FP)
    pub fn precision(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let (tp, fp, _, _) = Self::confusion_values(y_true, y_pred);
        if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        }
    }

    /// TP / (TP + FN)
    pub fn recall(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let (tp, _, fn_, _) = Self::confusion_values(y_true, y_pred);
        if tp + fn_ == 0 {
            0.0
        } else {
            tp as f64 / (tp + fn_) as f64
        }
    }

    /// 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        let precision = Self::precision(y_true, y_pred);
        let recall = Self::recall(y_true, y_pred);

        if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        }
    }

    /// (TP, FP, FN, TN) with 1.0 as the positive class.
    pub fn confusion_values(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> (usize, usize, usize, usize) {
        let mut tp = 0;
        let mut fp = 0;
        let mut fn_ = 0;
        let mut tn = 0;

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            let actual_positive = *t > 0.5;
            let predicted_positive = *p > 0.5;

            match (actual_positive, predicted_positive) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => tn += 1,
            }
        }

        (tp, fp, fn_, tn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let y_true = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0]);
        let y_pred = Array1::from_vec(vec![1.0, 0.0, 0.0, 0.0]);

        assert_eq!(Metrics::accuracy(&y_true, &y_pred), 0.75);
    }

    #[test]
    fn test_precision_recall_f1() {
        // TP=2, FP=1, FN=1, TN=1
        let y_true = Array1::from_vec(vec![1.0, 1.0, 1.0, 0.0, 0.0]);
        let y_pred = Array1::from_vec(vec![1.0, 1.0, 0.0, 1.0, 0.0]);

        assert_eq!(Metrics::confusion_values(&y_true, &y_pred), (2, 1, 1, 1));
        assert!((Metrics::precision(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((Metrics::recall(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
        assert!((Metrics::f1_score(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_cases() {
        let empty = Array1::from_vec(vec![]);
        assert_eq!(Metrics::accuracy(&empty, &empty), 0.0);

        let y_true = Array1::from_vec(vec![0.0, 0.0]);
        let y_pred = Array1::from_vec(vec![0.0, 0.0]);
        assert_eq!(Metrics::precision(&y_true, &y_pred), 0.0);
        assert_eq!(Metrics::recall(&y_true, &y_pred), 0.0);
        assert_eq!(Metrics::f1_score(&y_true, &y_pred), 0.0);
    }
}
