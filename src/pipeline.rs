//! End-to-end pipeline
//!
//! load -> derive features -> build vocabulary (combined corpus) -> encode
//! -> assemble -> fit classifiers -> blend -> write prediction files.
//! Every stage hands an immutable value to the next; nothing is shared
//! mutably across stages.

use crate::data::loader::DataLoader;
use crate::data::types::{Prediction, TweetRecord};
use crate::features::engine::{DerivedRow, FeatureEngine};
use crate::features::matrix::FeatureMatrix;
use crate::metrics::Metrics;
use crate::models::{
    Classifier, ForestConfig, GaussianNaiveBayes, LogisticRegression, RandomForest,
    WeightedEnsemble,
};
use crate::nlp::{DocumentTermEncoder, Vocabulary, VocabularyBuilder};
use anyhow::{Context, Result};
use ndarray::Array1;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Pipeline parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fraction of the train partition held out for evaluation
    pub holdout_ratio: f64,
    /// Seed for the holdout split and the forest
    pub seed: u64,
    /// Tune the ensemble threshold on the holdout instead of using 0.5
    pub tune_threshold: bool,
    /// Forest parameters
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            holdout_ratio: 0.2,
            seed: 42,
            tune_threshold: true,
            forest: ForestConfig::default(),
        }
    }
}

/// Holdout metrics of one classifier or ensemble variant.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub name: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub threshold: f64,
    pub holdout: Vec<VariantReport>,
    pub outputs: Vec<PathBuf>,
}

/// Run the full pipeline and write one prediction file per variant.
pub fn run<P: AsRef<Path>>(
    train_path: P,
    test_path: P,
    output_dir: P,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let train = DataLoader::load_train(&train_path)
        .with_context(|| format!("loading train partition {:?}", train_path.as_ref()))?;
    let test = DataLoader::load_test(&test_path)
        .with_context(|| format!("loading test partition {:?}", test_path.as_ref()))?;
    info!(train = train.len(), test = test.len(), "partitions loaded");

    let (train_matrix, test_matrix, vocabulary) = build_matrices(&train, &test)?;
    info!(
        terms = vocabulary.len(),
        columns = train_matrix.n_features(),
        "feature matrices assembled"
    );

    let x_train = train_matrix.features_array();
    let y_train = train_matrix
        .labels_array()
        .context("train partition lost its labels during assembly")?;
    let x_test = test_matrix.features_array();

    // holdout evaluation and threshold tuning on a seeded split
    let mut ensemble = WeightedEnsemble::new();
    let holdout = evaluate_on_holdout(&train_matrix, config, &mut ensemble)?;

    // final models are fitted on the full train partition
    let mut logistic = LogisticRegression::with_l2(1.0);
    let mut naive_bayes = GaussianNaiveBayes::new();
    let mut forest = RandomForest::new(ForestConfig {
        seed: config.seed,
        ..config.forest.clone()
    });

    logistic
        .fit(&x_train, &y_train)
        .context("fitting logistic regression")?;
    naive_bayes
        .fit(&x_train, &y_train)
        .context("fitting naive Bayes")?;
    forest.fit(&x_train, &y_train).context("fitting random forest")?;

    for (name, importance) in forest
        .importance_ranking(&train_matrix.feature_names)
        .into_iter()
        .take(10)
    {
        info!("forest importance: {name} = {importance:.4}");
    }

    let proba_logistic = logistic.predict_proba(&x_test)?;
    let proba_nb = naive_bayes.predict_proba(&x_test)?;
    let proba_forest = forest.predict_proba(&x_test)?;
    let proba_ensemble = ensemble.blend(&proba_logistic, &proba_forest)?;

    std::fs::create_dir_all(output_dir.as_ref())
        .with_context(|| format!("creating output directory {:?}", output_dir.as_ref()))?;

    let mut outputs = Vec::new();
    let default_cut = 0.5;
    for (name, proba, threshold) in [
        ("logistic", &proba_logistic, default_cut),
        ("naive_bayes", &proba_nb, default_cut),
        ("random_forest", &proba_forest, default_cut),
        ("ensemble", &proba_ensemble, ensemble.threshold()),
    ] {
        let path = output_dir.as_ref().join(format!("{name}.csv"));
        let predictions = to_predictions(&test_matrix.ids, proba, threshold);
        DataLoader::write_predictions(&path, &predictions)
            .with_context(|| format!("writing {name} predictions"))?;
        outputs.push(path);
    }

    Ok(RunSummary {
        n_train: train.len(),
        n_test: test.len(),
        vocabulary_size: vocabulary.len(),
        threshold: ensemble.threshold(),
        holdout,
        outputs,
    })
}

/// Derive features, freeze the vocabulary over the combined corpus and
/// assemble one aligned matrix per partition.
pub fn build_matrices(
    train: &[TweetRecord],
    test: &[TweetRecord],
) -> Result<(FeatureMatrix, FeatureMatrix, Vocabulary)> {
    let engine = FeatureEngine::new();
    let derived_train = engine.derive_all(train);
    let derived_test = engine.derive_all(test);

    let empty = derived_train
        .iter()
        .chain(derived_test.iter())
        .filter(|d| d.features.char_count == 0)
        .count();
    if empty > 0 {
        warn!(rows = empty, "empty texts yield all-zero feature rows");
    }

    let corpus: Vec<String> = normalized_texts(&derived_train)
        .chain(normalized_texts(&derived_test))
        .collect();
    let vocabulary = VocabularyBuilder::new()
        .build(&corpus)
        .context("building vocabulary over the combined corpus")?;

    let encoder = DocumentTermEncoder::new();
    let train_counts =
        encoder.encode_all(&vocabulary, &normalized_texts(&derived_train).collect::<Vec<_>>());
    let test_counts =
        encoder.encode_all(&vocabulary, &normalized_texts(&derived_test).collect::<Vec<_>>());

    let train_matrix =
        FeatureMatrix::assemble(train, &derived_train, train_counts, &vocabulary, true)?;
    let test_matrix =
        FeatureMatrix::assemble(test, &derived_test, test_counts, &vocabulary, false)?;

    train_matrix.ensure_aligned(&test_matrix)?;

    Ok((train_matrix, test_matrix, vocabulary))
}

fn normalized_texts(derived: &[DerivedRow]) -> impl Iterator<Item = String> + '_ {
    derived.iter().map(|d| d.normalized_text.clone())
}

/// Fit fresh models on the fit part of a seeded split, report holdout
/// metrics per variant, and tune the ensemble threshold if configured.
fn evaluate_on_holdout(
    train_matrix: &FeatureMatrix,
    config: &PipelineConfig,
    ensemble: &mut WeightedEnsemble,
) -> Result<Vec<VariantReport>> {
    let split = train_matrix.random_split(config.holdout_ratio, config.seed);
    if split.holdout.n_samples() == 0 || split.fit.n_samples() == 0 {
        warn!("holdout split is degenerate, skipping evaluation and tuning");
        return Ok(Vec::new());
    }

    let x_fit = split.fit.features_array();
    let y_fit = split
        .fit
        .labels_array()
        .context("fit split lost its labels")?;
    let x_holdout = split.holdout.features_array();
    let y_holdout = split
        .holdout
        .labels_array()
        .context("holdout split lost its labels")?;

    let mut logistic = LogisticRegression::with_l2(1.0);
    let mut naive_bayes = GaussianNaiveBayes::new();
    let mut forest = RandomForest::new(ForestConfig {
        seed: config.seed,
        ..config.forest.clone()
    });

    logistic.fit(&x_fit, &y_fit).context("fitting logistic regression on fit split")?;
    naive_bayes.fit(&x_fit, &y_fit).context("fitting naive Bayes on fit split")?;
    forest.fit(&x_fit, &y_fit).context("fitting random forest on fit split")?;

    let proba_logistic = logistic.predict_proba(&x_holdout)?;
    let proba_nb = naive_bayes.predict_proba(&x_holdout)?;
    let proba_forest = forest.predict_proba(&x_holdout)?;
    let proba_ensemble = ensemble.blend(&proba_logistic, &proba_forest)?;

    if config.tune_threshold {
        ensemble.tune_threshold(&proba_ensemble, &y_holdout);
    }

    let mut reports = Vec::new();
    for (name, proba, threshold) in [
        ("logistic", &proba_logistic, 0.5),
        ("naive_bayes", &proba_nb, 0.5),
        ("random_forest", &proba_forest, 0.5),
        ("ensemble", &proba_ensemble, ensemble.threshold()),
    ] {
        let predicted = threshold_labels(proba, threshold);
        let report = VariantReport {
            name: name.to_string(),
            accuracy: Metrics::accuracy(&y_holdout, &predicted),
            precision: Metrics::precision(&y_holdout, &predicted),
            recall: Metrics::recall(&y_holdout, &predicted),
            f1: Metrics::f1_score(&y_holdout, &predicted),
        };
        info!(
            variant = name,
            accuracy = report.accuracy,
            f1 = report.f1,
            "holdout evaluation"
        );
        reports.push(report);
    }

    Ok(reports)
}

fn threshold_labels(proba: &Array1<f64>, threshold: f64) -> Array1<f64> {
    proba.mapv(|p| if p >= threshold { 1.0 } else { 0.0 })
}

fn to_predictions(ids: &[i64], proba: &Array1<f64>, threshold: f64) -> Vec<Prediction> {
    ids.iter()
        .zip(proba.iter())
        .map(|(&id, &p)| Prediction {
            id,
            target: u8::from(p >= threshold),
        })
        .collect()
}

/// Dataset statistics for the `summary` subcommand.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub n_train: usize,
    pub n_test: usize,
    pub positive: usize,
    pub negative: usize,
    pub empty_texts: usize,
    pub mean_char_count: f64,
}

/// Row counts, class balance and degenerate-text count.
pub fn summarize(train: &[TweetRecord], test: &[TweetRecord]) -> DatasetSummary {
    let positive = train.iter().filter(|r| r.target == Some(1)).count();
    let negative = train.len().saturating_sub(positive);
    let empty_texts = train
        .iter()
        .chain(test.iter())
        .filter(|r| r.text.trim().is_empty())
        .count();

    let total_chars: usize = train
        .iter()
        .chain(test.iter())
        .map(|r| r.text.chars().count())
        .sum();
    let total_rows = train.len() + test.len();
    let mean_char_count = if total_rows == 0 {
        0.0
    } else {
        total_chars as f64 / total_rows as f64
    };

    DatasetSummary {
        n_train: train.len(),
        n_test: test.len(),
        positive,
        negative,
        empty_texts,
        mean_char_count,
    }
}
