//! Hand-crafted per-tweet features
//!
//! A pure per-row map: every feature is computed from that row's raw text
//! alone, so the whole pass parallelizes trivially. Scalar counts are taken
//! on the raw text; the URL-normalized rewrite feeds only the vocabulary
//! path.

use crate::data::TweetRecord;
use crate::sentiment::ToneScorer;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());

/// Constant token substituted for every URL match.
pub const URL_PLACEHOLDER: &str = "URL";

/// Scalar feature names in assembled column order.
pub const SCALAR_FEATURES: [&str; 10] = [
    "url_count",
    "punct_count",
    "handles_count",
    "hashtag_count",
    "char_count",
    "capital_count",
    "capital_prop",
    "number_count",
    "tone",
    "word_count",
];

/// Scalar features of one tweet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextFeatures {
    /// Matches of the http(s) URL pattern
    pub url_count: usize,
    /// Characters in {. ! ? , " ' -}
    pub punct_count: usize,
    /// `@` characters
    pub handles_count: usize,
    /// `#` characters
    pub hashtag_count: usize,
    /// Character length of the pre-replacement text
    pub char_count: usize,
    /// ASCII uppercase letters
    pub capital_count: usize,
    /// capital_count / char_count, 0.0 for empty text
    pub capital_prop: f64,
    /// Decimal digit characters
    pub number_count: usize,
    /// Mean sentence polarity
    pub tone: f64,
    /// Token count from the tone scorer's tokenizer
    pub word_count: usize,
}

impl TextFeatures {
    /// Values in `SCALAR_FEATURES` order.
    pub fn to_row(&self) -> Vec<f64> {
        vec![
            self.url_count as f64,
            self.punct_count as f64,
            self.handles_count as f64,
            self.hashtag_count as f64,
            self.char_count as f64,
            self.capital_count as f64,
            self.capital_prop,
            self.number_count as f64,
            self.tone,
            self.word_count as f64,
        ]
    }
}

/// One derived row: scalar features plus the URL-normalized text.
#[derive(Debug, Clone)]
pub struct DerivedRow {
    pub features: TextFeatures,
    /// Raw text with every URL replaced by [`URL_PLACEHOLDER`]
    pub normalized_text: String,
}

/// Per-row feature extractor.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    scorer: ToneScorer,
}

impl FeatureEngine {
    pub fn new() -> Self {
        Self {
            scorer: ToneScorer::new(),
        }
    }

    /// Derive features for one text.
    pub fn derive(&self, text: &str) -> DerivedRow {
        let url_count = URL_REGEX.find_iter(text).count();
        let normalized_text = URL_REGEX.replace_all(text, URL_PLACEHOLDER).into_owned();

        let mut punct_count = 0;
        let mut handles_count = 0;
        let mut hashtag_count = 0;
        let mut char_count = 0;
        let mut capital_count = 0;
        let mut number_count = 0;

        for c in text.chars() {
            char_count += 1;
            match c {
                '.' | '!' | '?' | ',' | '"' | '\'' | '-' => punct_count += 1,
                '@' => handles_count += 1,
                '#' => hashtag_count += 1,
                _ => {}
            }
            if c.is_ascii_uppercase() {
                capital_count += 1;
            }
            if c.is_ascii_digit() {
                number_count += 1;
            }
        }

        let capital_prop = if char_count == 0 {
            0.0
        } else {
            capital_count as f64 / char_count as f64
        };

        let tone_score = self.scorer.score(text);

        DerivedRow {
            features: TextFeatures {
                url_count,
                punct_count,
                handles_count,
                hashtag_count,
                char_count,
                capital_count,
                capital_prop,
                number_count,
                tone: tone_score.tone,
                word_count: tone_score.word_count,
            },
            normalized_text,
        }
    }

    /// Derive features for a whole partition.
    pub fn derive_all(&self, records: &[TweetRecord]) -> Vec<DerivedRow> {
        records
            .par_iter()
            .map(|record| self.derive(&record.text))
            .collect()
    }
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaking_wildfire_example() {
        let engine = FeatureEngine::new();
        let row = engine.derive("BREAKING: wildfire spreads near http://x.co #fire @news");

        assert_eq!(row.features.url_count, 1);
        assert_eq!(row.features.hashtag_count, 1);
        assert_eq!(row.features.handles_count, 1);
        assert!(row.normalized_text.contains(URL_PLACEHOLDER));
        assert!(!row.normalized_text.contains("http://"));
    }

    #[test]
    fn test_counts() {
        let engine = FeatureEngine::new();
        let row = engine.derive("Help! 3 houses burned, we're safe.");

        // '!' ',' '\'' '.' and the '-' free text has none
        assert_eq!(row.features.punct_count, 4);
        assert_eq!(row.features.number_count, 1);
        assert_eq!(row.features.capital_count, 1);
        assert_eq!(row.features.char_count, 34);
    }

    #[test]
    fn test_capital_prop_bounds() {
        let engine = FeatureEngine::new();

        for text in ["ALL CAPS", "no caps", "Mixed Case 42", ""] {
            let f = engine.derive(text).features;
            assert!(f.capital_count <= f.char_count);
            assert!((0.0..=1.0).contains(&f.capital_prop));
        }
    }

    #[test]
    fn test_empty_text_yields_zeros() {
        let engine = FeatureEngine::new();
        let f = engine.derive("").features;

        assert_eq!(f.url_count, 0);
        assert_eq!(f.char_count, 0);
        assert_eq!(f.capital_prop, 0.0);
        assert_eq!(f.tone, 0.0);
        assert_eq!(f.word_count, 0);
    }

    #[test]
    fn test_multiple_urls_normalized() {
        let engine = FeatureEngine::new();
        let row = engine.derive("see https://a.example/x and http://b.example/y");

        assert_eq!(row.features.url_count, 2);
        assert_eq!(
            row.normalized_text,
            format!("see {URL_PLACEHOLDER} and {URL_PLACEHOLDER}")
        );
    }

    #[test]
    fn test_scalar_row_order_matches_names() {
        let engine = FeatureEngine::new();
        let f = engine.derive("Fire at 5, stay away! #alert").features;
        let row = f.to_row();

        assert_eq!(row.len(), SCALAR_FEATURES.len());
        assert_eq!(row[0], f.url_count as f64);
        assert_eq!(row[6], f.capital_prop);
        assert_eq!(row[9], f.word_count as f64);
    }
}
