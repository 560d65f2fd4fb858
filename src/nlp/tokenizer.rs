//! Word tokenizer
//!
//! Splits text on whitespace, strips punctuation from each word and applies
//! length bounds. Shared by the vocabulary builder, the document-term
//! encoder and the tone scorer so every consumer sees the same token stream.

/// Whitespace/punctuation-aware word tokenizer.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    /// Minimum word length after cleaning
    min_word_length: usize,
    /// Maximum word length after cleaning
    max_word_length: usize,
    /// Lowercase tokens
    lowercase: bool,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self {
            min_word_length: 2,
            max_word_length: 50,
            lowercase: true,
        }
    }

    /// Set the minimum word length.
    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    /// Set the maximum word length.
    pub fn with_max_length(mut self, len: usize) -> Self {
        self.max_word_length = len;
        self
    }

    /// Keep the original case of each token.
    pub fn preserve_case(mut self) -> Self {
        self.lowercase = false;
        self
    }

    /// Tokenize text into cleaned words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|word| {
                let cleaned = Self::clean_word(word);
                if cleaned.len() < self.min_word_length || cleaned.len() > self.max_word_length {
                    return None;
                }
                if self.lowercase {
                    Some(cleaned.to_lowercase())
                } else {
                    Some(cleaned)
                }
            })
            .collect()
    }

    /// Strip punctuation, keeping alphanumerics plus `-` and `_`.
    fn clean_word(word: &str) -> String {
        word.chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenization() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("Flood warning issued");

        assert_eq!(tokens, vec!["flood", "warning", "issued"]);
    }

    #[test]
    fn test_punctuation_stripped() {
        let tokenizer = WordTokenizer::new();
        let tokens = tokenizer.tokenize("fire! evacuation, now.");

        assert_eq!(tokens, vec!["fire", "evacuation", "now"]);
    }

    #[test]
    fn test_min_length_filter() {
        let tokenizer = WordTokenizer::new().with_min_length(3);
        let tokens = tokenizer.tokenize("I am at the shelter");

        assert!(tokens.iter().all(|t| t.len() >= 3));
        assert!(tokens.contains(&"shelter".to_string()));
    }

    #[test]
    fn test_preserve_case() {
        let tokenizer = WordTokenizer::new().preserve_case();
        let tokens = tokenizer.tokenize("BREAKING news");

        assert_eq!(tokens, vec!["BREAKING", "news"]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = WordTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
    }
}
