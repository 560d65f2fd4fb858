//! # Disaster Tweets — text-feature classification pipeline
//!
//! Batch pipeline for a labeled tweet dataset: load train/test CSV
//! partitions, derive hand-crafted scalar features per tweet, build a pruned
//! bag-of-words vocabulary over the combined corpus, encode document-term
//! count matrices, fit three classifiers and blend two of them into a
//! weighted-vote ensemble.
//!
//! ## Modules
//!
//! - `data` - CSV loading and prediction output
//! - `features` - per-tweet scalar features and matrix assembly
//! - `nlp` - tokenization, stop words, vocabulary, document-term encoding
//! - `sentiment` - lexicon-based tone scoring
//! - `models` - classifiers and the weighted ensemble
//! - `metrics` - classification metrics
//! - `pipeline` - end-to-end orchestration

pub mod data;
pub mod features;
pub mod metrics;
pub mod models;
pub mod nlp;
pub mod pipeline;
pub mod sentiment;

pub use data::loader::DataLoader;
pub use data::types::TweetRecord;
pub use features::engine::FeatureEngine;
pub use features::matrix::FeatureMatrix;
pub use metrics::Metrics;
pub use models::{Classifier, GaussianNaiveBayes, LogisticRegression, RandomForest, WeightedEnsemble};
pub use nlp::{DocumentTermEncoder, Vocabulary, VocabularyBuilder, WordTokenizer};
pub use sentiment::ToneScorer;
