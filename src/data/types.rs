//! Row types for the tweet dataset

use serde::{Deserialize, Serialize};

/// One tweet record as read from the train or test partition.
///
/// `target` is present only in the training partition. `keyword` and
/// `location` are loaded for completeness but do not enter the feature
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Unique row identifier
    pub id: i64,
    /// Dataset-provided keyword, often absent
    #[serde(default)]
    pub keyword: Option<String>,
    /// Free-form user location, often absent
    #[serde(default)]
    pub location: Option<String>,
    /// Raw tweet text, possibly empty
    #[serde(default)]
    pub text: String,
    /// Binary label: 1 = real disaster, 0 = not
    #[serde(default)]
    pub target: Option<u8>,
}

impl TweetRecord {
    /// Label as a float for the model layer, if present.
    pub fn label(&self) -> Option<f64> {
        self.target.map(f64::from)
    }
}

/// One output row of a prediction file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Prediction {
    pub id: i64,
    pub target: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_conversion() {
        let mut record = TweetRecord {
            id: 1,
            keyword: None,
            location: None,
            text: "water everywhere".to_string(),
            target: Some(1),
        };
        assert_eq!(record.label(), Some(1.0));

        record.target = None;
        assert_eq!(record.label(), None);
    }
}
