//! Tone scorer
//!
//! Splits text into sentences, scores each sentence from the lexicon with
//! negation and modifier handling, and reports the mean sentence polarity
//! plus the token count the scoring was based on.

use super::lexicon::{PolarityLexicon, ToneLexicon};
use crate::nlp::WordTokenizer;

/// Tone of one text: mean sentence polarity and the token count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneScore {
    /// Mean sentence polarity, negative means negative tone
    pub tone: f64,
    /// Tokens produced by the scorer's tokenizer over the whole text
    pub word_count: usize,
}

/// Sentence-level polarity scorer.
#[derive(Debug, Clone)]
pub struct ToneScorer {
    tokenizer: WordTokenizer,
    lexicon: ToneLexicon,
    /// Tokens after a negation marker that still get their score flipped
    negation_window: usize,
}

impl ToneScorer {
    pub fn new() -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            lexicon: ToneLexicon::new(),
            negation_window: 3,
        }
    }

    /// Use a custom lexicon.
    pub fn with_lexicon(mut self, lexicon: ToneLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Set the negation window.
    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    /// Score one text: mean polarity over its sentences.
    ///
    /// A sentence with no lexicon hits scores 0. Empty text scores 0 with a
    /// word count of 0.
    pub fn score(&self, text: &str) -> ToneScore {
        let mut sentence_scores = Vec::new();
        let mut word_count = 0usize;

        for sentence in Self::split_sentences(text) {
            let tokens = self.tokenizer.tokenize(sentence);
            if tokens.is_empty() {
                continue;
            }
            word_count += tokens.len();
            sentence_scores.push(self.score_tokens(&tokens));
        }

        let tone = if sentence_scores.is_empty() {
            0.0
        } else {
            sentence_scores.iter().sum::<f64>() / sentence_scores.len() as f64
        };

        ToneScore { tone, word_count }
    }

    /// Split on sentence-terminating punctuation, keeping non-empty parts.
    fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Polarity of one token sequence, clamped to [-1, 1].
    fn score_tokens(&self, tokens: &[String]) -> f64 {
        let mut total = 0.0;
        let mut matched = 0usize;
        let mut current_modifier = 1.0;
        let mut negation_active = false;
        let mut words_since_negation = 0usize;

        for token in tokens {
            if self.lexicon.is_negation(token) {
                negation_active = true;
                words_since_negation = 0;
                continue;
            }

            if let Some(modifier) = self.lexicon.get_modifier(token) {
                current_modifier = modifier;
                continue;
            }

            if let Some(base) = self.lexicon.get_score(token) {
                let mut score = base * current_modifier;
                if negation_active && words_since_negation < self.negation_window {
                    // flip with damping, a negated word is rarely a full inverse
                    score = -score * 0.8;
                }
                total += score;
                matched += 1;
                current_modifier = 1.0;
            }

            if negation_active {
                words_since_negation += 1;
                if words_since_negation >= self.negation_window {
                    negation_active = false;
                }
            }
        }

        if matched == 0 {
            0.0
        } else {
            (total / matched as f64).clamp(-1.0, 1.0)
        }
    }
}

impl Default for ToneScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_tone() {
        let scorer = ToneScorer::new();
        let score = scorer.score("Devastating flood. Many killed.");

        assert!(score.tone < -0.5);
        assert_eq!(score.word_count, 4);
    }

    #[test]
    fn test_positive_tone() {
        let scorer = ToneScorer::new();
        let score = scorer.score("What a wonderful day! Everyone is safe.");

        assert!(score.tone > 0.0);
    }

    #[test]
    fn test_neutral_without_lexicon_hits() {
        let scorer = ToneScorer::new();
        let score = scorer.score("The train departs at noon from platform nine.");

        assert_eq!(score.tone, 0.0);
        assert!(score.word_count > 0);
    }

    #[test]
    fn test_empty_text() {
        let scorer = ToneScorer::new();
        let score = scorer.score("");

        assert_eq!(score.tone, 0.0);
        assert_eq!(score.word_count, 0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = ToneScorer::new();

        let plain = scorer.score("this is safe");
        let negated = scorer.score("this is not safe");

        assert!(plain.tone > 0.0);
        assert!(negated.tone < 0.0);
    }

    #[test]
    fn test_modifier_amplifies() {
        let scorer = ToneScorer::new();

        let plain = scorer.score("bad storm");
        let intensified = scorer.score("extremely bad storm");

        assert!(intensified.tone < plain.tone);
    }

    #[test]
    fn test_sentence_average() {
        let scorer = ToneScorer::new();

        // one negative sentence, one neutral sentence: mean halves the hit
        let single = scorer.score("terrible crash");
        let mixed = scorer.score("terrible crash. the road reopened later.");

        assert!(mixed.tone > single.tone);
        assert!(mixed.tone < 0.0);
    }
}
