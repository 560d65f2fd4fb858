//! Dataset loading and prediction output

pub mod loader;
pub mod types;

pub use loader::{DataError, DataLoader};
pub use types::{Prediction, TweetRecord};
