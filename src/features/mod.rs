//! Per-tweet scalar features and assembled feature matrices

pub mod engine;
pub mod matrix;

pub use engine::{DerivedRow, FeatureEngine, TextFeatures, SCALAR_FEATURES, URL_PLACEHOLDER};
pub use matrix::{FeatureError, FeatureMatrix, Split};
