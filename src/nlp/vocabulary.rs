//! Vocabulary construction over the combined corpus
//!
//! Term statistics are accumulated over every document (train and test
//! together), stop words are removed, and the remaining terms are pruned by
//! total occurrence count and document proportion before the vocabulary is
//! frozen in lexicographic order. After freezing the vocabulary is immutable
//! and shared by both partition encodes.

use super::stopwords::is_stop_word;
use super::tokenizer::WordTokenizer;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Errors raised during vocabulary construction.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("empty text corpus: no tokens survive tokenization")]
    EmptyText,
}

/// Frozen vocabulary: retained terms with stable column indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Terms in lexicographic order; position is the column index
    terms: Vec<String>,
    /// Term -> column index
    index: HashMap<String, usize>,
    /// Distinct-document count per term, aligned with `terms`
    doc_counts: Vec<usize>,
    /// Total documents in the corpus the vocabulary was built from
    n_documents: usize,
}

impl Vocabulary {
    /// Number of retained terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column index of a term, if retained.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Retained terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Documents in the corpus the vocabulary was frozen from.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Document proportion of the term at column `idx`.
    pub fn doc_proportion(&self, idx: usize) -> f64 {
        if self.n_documents == 0 {
            return 0.0;
        }
        self.doc_counts[idx] as f64 / self.n_documents as f64
    }

    /// Terms ranked by distinct-document count, highest first.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .terms
            .iter()
            .map(|t| t.as_str())
            .zip(self.doc_counts.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Builder accumulating term statistics and applying the pruning rules.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    tokenizer: WordTokenizer,
    /// Minimum total occurrence count, inclusive
    min_term_count: usize,
    /// Maximum document proportion, inclusive
    max_doc_proportion: f64,
    /// Minimum document proportion, inclusive
    min_doc_proportion: f64,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            min_term_count: 10,
            max_doc_proportion: 0.5,
            min_doc_proportion: 0.001,
        }
    }

    pub fn with_min_term_count(mut self, count: usize) -> Self {
        self.min_term_count = count;
        self
    }

    pub fn with_max_doc_proportion(mut self, proportion: f64) -> Self {
        self.max_doc_proportion = proportion;
        self
    }

    pub fn with_min_doc_proportion(mut self, proportion: f64) -> Self {
        self.min_doc_proportion = proportion;
        self
    }

    /// Build and freeze the vocabulary from the full corpus.
    ///
    /// The result depends only on the multiset of documents, not their
    /// order: statistics go through a hash map and the surviving terms are
    /// sorted lexicographically at freeze time.
    pub fn build(&self, texts: &[String]) -> Result<Vocabulary, VocabularyError> {
        let n_documents = texts.len();

        // term -> (total occurrences, distinct documents)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        let mut total_tokens = 0usize;

        for text in texts {
            let tokens = self.tokenizer.tokenize(text);
            total_tokens += tokens.len();

            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                let entry = stats.entry(token.clone()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(token.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if n_documents == 0 || total_tokens == 0 {
            return Err(VocabularyError::EmptyText);
        }

        let mut retained: Vec<(String, usize)> = stats
            .into_iter()
            .filter(|(term, _)| !is_stop_word(term))
            .filter(|(_, (count, doc_count))| {
                let proportion = *doc_count as f64 / n_documents as f64;
                *count >= self.min_term_count
                    && proportion <= self.max_doc_proportion
                    && proportion >= self.min_doc_proportion
            })
            .map(|(term, (_, doc_count))| (term, doc_count))
            .collect();

        retained.sort_by(|a, b| a.0.cmp(&b.0));

        let mut terms = Vec::with_capacity(retained.len());
        let mut doc_counts = Vec::with_capacity(retained.len());
        let mut index = HashMap::with_capacity(retained.len());

        for (column, (term, doc_count)) in retained.into_iter().enumerate() {
            index.insert(term.clone(), column);
            terms.push(term);
            doc_counts.push(doc_count);
        }

        debug!(
            terms = terms.len(),
            documents = n_documents,
            "vocabulary frozen"
        );

        Ok(Vocabulary {
            terms,
            index,
            doc_counts,
            n_documents,
        })
    }
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Corpus where "flood" occurs 10 times across 10 of 40 documents and
    /// "quake" 9 times across 9; filler terms keep each document non-empty.
    fn pruning_corpus() -> Vec<String> {
        let mut texts = Vec::new();
        for i in 0..40 {
            let mut doc = format!("filler{i} padding{i}");
            if i < 10 {
                doc.push_str(" flood");
            }
            if i < 9 {
                doc.push_str(" quake");
            }
            texts.push(doc);
        }
        texts
    }

    #[test]
    fn test_min_count_inclusive_bound() {
        let builder = VocabularyBuilder::new().with_min_doc_proportion(0.0);
        let vocabulary = builder.build(&pruning_corpus()).unwrap();

        // count exactly 10 retained, count 9 dropped
        assert!(vocabulary.index_of("flood").is_some());
        assert!(vocabulary.index_of("quake").is_none());
    }

    #[test]
    fn test_max_doc_proportion_drops_frequent_terms() {
        // "common" appears in every document: proportion 1.0 > 0.5
        let texts: Vec<String> = (0..20)
            .map(|i| format!("common rare{} flood flood", i % 2))
            .collect();

        let builder = VocabularyBuilder::new()
            .with_min_term_count(5)
            .with_min_doc_proportion(0.0);
        let vocabulary = builder.build(&texts).unwrap();

        assert!(vocabulary.index_of("common").is_none());
        assert!(vocabulary.index_of("flood").is_none()); // proportion 1.0
        assert!(vocabulary.index_of("rare0").is_some()); // proportion 0.5, inclusive
    }

    #[test]
    fn test_min_doc_proportion_drops_rare_terms() {
        // "burst" sits in 1 of 20 documents: proportion 0.05 < 0.2
        let mut texts: Vec<String> = (0..19).map(|i| format!("steady{} steady{i}", i % 4)).collect();
        texts.push("burst burst burst burst burst burst".to_string());

        let builder = VocabularyBuilder::new()
            .with_min_term_count(5)
            .with_min_doc_proportion(0.2);
        let vocabulary = builder.build(&texts).unwrap();

        assert!(vocabulary.index_of("burst").is_none());
    }

    #[test]
    fn test_stop_words_removed() {
        let texts: Vec<String> = (0..20).map(|_| "the fire the fire".to_string()).collect();

        let builder = VocabularyBuilder::new()
            .with_max_doc_proportion(1.0)
            .with_min_doc_proportion(0.0);
        let vocabulary = builder.build(&texts).unwrap();

        assert!(vocabulary.index_of("the").is_none());
        assert!(vocabulary.index_of("fire").is_some());
    }

    #[test]
    fn test_row_order_invariance() {
        let corpus = pruning_corpus();
        let mut reversed = corpus.clone();
        reversed.reverse();

        let builder = VocabularyBuilder::new().with_min_doc_proportion(0.0);
        let forward = builder.build(&corpus).unwrap();
        let backward = builder.build(&reversed).unwrap();

        assert_eq!(forward.terms(), backward.terms());
    }

    #[test]
    fn test_lexicographic_order() {
        let texts: Vec<String> = (0..10).map(|_| "storm blaze wreck".to_string()).collect();

        let builder = VocabularyBuilder::new()
            .with_min_term_count(5)
            .with_max_doc_proportion(1.0)
            .with_min_doc_proportion(0.0);
        let vocabulary = builder.build(&texts).unwrap();

        assert_eq!(vocabulary.terms(), &["blaze", "storm", "wreck"]);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let builder = VocabularyBuilder::new();
        assert!(matches!(
            builder.build(&[]),
            Err(VocabularyError::EmptyText)
        ));
        assert!(matches!(
            builder.build(&["".to_string(), "  ".to_string()]),
            Err(VocabularyError::EmptyText)
        ));
    }
}
