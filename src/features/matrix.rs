//! Assembled feature matrices
//!
//! One `FeatureMatrix` per partition: scalar feature columns first, then
//! one column per vocabulary term, in the vocabulary's frozen order. Train
//! and test are assembled against the same vocabulary, and alignment is
//! still checked explicitly because the downstream classifiers assume
//! positional feature identity.

use super::engine::{DerivedRow, SCALAR_FEATURES};
use crate::data::TweetRecord;
use crate::nlp::Vocabulary;
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Errors raised during assembly and alignment checks.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("train/test feature misalignment: {left} vs {right} columns")]
    VocabularyMismatch { left: usize, right: usize },

    #[error("row {id}: expected {expected} term counts, got {got}")]
    RowLength {
        id: i64,
        expected: usize,
        got: usize,
    },
}

/// Assembled matrix for one partition.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Row ids, aligned with `rows`
    pub ids: Vec<i64>,
    /// Column names: scalar features, then `term_<word>` per vocabulary term
    pub feature_names: Vec<String>,
    /// Dense feature rows
    pub rows: Vec<Vec<f64>>,
    /// Labels, present for the training partition only
    pub labels: Option<Vec<f64>>,
}

/// Seeded holdout split of a labeled matrix.
pub struct Split {
    pub fit: FeatureMatrix,
    pub holdout: FeatureMatrix,
}

impl FeatureMatrix {
    /// Concatenate scalar features with term counts, in fixed column order.
    pub fn assemble(
        records: &[TweetRecord],
        derived: &[DerivedRow],
        term_rows: Vec<Vec<f64>>,
        vocabulary: &Vocabulary,
        with_labels: bool,
    ) -> Result<Self, FeatureError> {
        debug_assert_eq!(records.len(), derived.len());
        debug_assert_eq!(records.len(), term_rows.len());

        let mut feature_names: Vec<String> =
            SCALAR_FEATURES.iter().map(|s| s.to_string()).collect();
        feature_names.extend(vocabulary.terms().iter().map(|t| format!("term_{t}")));

        let mut ids = Vec::with_capacity(records.len());
        let mut rows = Vec::with_capacity(records.len());
        let mut labels = if with_labels {
            Some(Vec::with_capacity(records.len()))
        } else {
            None
        };

        for ((record, row), counts) in records.iter().zip(derived).zip(term_rows) {
            if counts.len() != vocabulary.len() {
                return Err(FeatureError::RowLength {
                    id: record.id,
                    expected: vocabulary.len(),
                    got: counts.len(),
                });
            }

            let mut values = row.features.to_row();
            values.extend(counts);

            ids.push(record.id);
            rows.push(values);
            if let Some(labels) = labels.as_mut() {
                labels.push(record.label().unwrap_or(0.0));
            }
        }

        Ok(Self {
            ids,
            feature_names,
            rows,
            labels,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Feature matrix as ndarray.
    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();
        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }
        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.rows[i][j])
    }

    /// Labels as ndarray, if present.
    pub fn labels_array(&self) -> Option<Array1<f64>> {
        self.labels.as_ref().map(|l| Array1::from_vec(l.clone()))
    }

    /// Check positional alignment with another partition's matrix.
    pub fn ensure_aligned(&self, other: &FeatureMatrix) -> Result<(), FeatureError> {
        if self.n_features() != other.n_features()
            || self.feature_names != other.feature_names
        {
            return Err(FeatureError::VocabularyMismatch {
                left: self.n_features(),
                right: other.n_features(),
            });
        }
        Ok(())
    }

    /// Rows selected by index, in the given order.
    pub fn subset(&self, indices: &[usize]) -> FeatureMatrix {
        FeatureMatrix {
            ids: indices.iter().map(|&i| self.ids[i]).collect(),
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: self
                .labels
                .as_ref()
                .map(|l| indices.iter().map(|&i| l[i]).collect()),
        }
    }

    /// Seeded random split into a fit part and a holdout part.
    pub fn random_split(&self, holdout_ratio: f64, seed: u64) -> Split {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let holdout_size = (holdout_ratio * n as f64) as usize;
        let (holdout_indices, fit_indices) = indices.split_at(holdout_size);

        Split {
            fit: self.subset(fit_indices),
            holdout: self.subset(holdout_indices),
        }
    }
}
