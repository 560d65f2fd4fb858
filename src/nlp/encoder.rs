//! Document-term encoding against a frozen vocabulary
//!
//! Position `j` of an encoded row is the raw count of vocabulary term `j`
//! in the row's tokenized text. Out-of-vocabulary terms are ignored. Both
//! partitions are encoded against the same frozen vocabulary, so the column
//! count and semantics match by construction.

use super::tokenizer::WordTokenizer;
use super::vocabulary::Vocabulary;
use rayon::prelude::*;

/// Encoder mapping tokenized text to term-count vectors.
#[derive(Debug, Clone)]
pub struct DocumentTermEncoder {
    tokenizer: WordTokenizer,
}

impl DocumentTermEncoder {
    pub fn new() -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
        }
    }

    /// Encode one document as a count vector of length `vocabulary.len()`.
    pub fn encode(&self, vocabulary: &Vocabulary, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; vocabulary.len()];
        for token in self.tokenizer.tokenize(text) {
            if let Some(column) = vocabulary.index_of(&token) {
                counts[column] += 1.0;
            }
        }
        counts
    }

    /// Encode a whole partition, one count vector per document.
    pub fn encode_all(&self, vocabulary: &Vocabulary, texts: &[String]) -> Vec<Vec<f64>> {
        texts
            .par_iter()
            .map(|text| self.encode(vocabulary, text))
            .collect()
    }
}

impl Default for DocumentTermEncoder {
    fn default() -> Self {
        Self::new()
    }
}
