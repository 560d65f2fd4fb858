//! Polarity lexicon
//!
//! General-purpose English sentiment words with signed scores, plus
//! intensity modifiers and negation markers. Contracted negations appear in
//! punctuation-stripped form to match the tokenizer output.

use std::collections::HashMap;

/// Word-polarity lookup seam.
pub trait PolarityLexicon {
    /// Signed score of a word (-1.0 to 1.0), if the word carries polarity.
    fn get_score(&self, word: &str) -> Option<f64>;

    /// Whether the word carries polarity.
    fn contains(&self, word: &str) -> bool;
}

/// Built-in general-purpose lexicon.
#[derive(Debug, Clone)]
pub struct ToneLexicon {
    /// Positive words with scores
    positive: HashMap<String, f64>,
    /// Negative words with scores
    negative: HashMap<String, f64>,
    /// Intensity multipliers
    modifiers: HashMap<String, f64>,
    /// Negation markers
    negations: Vec<String>,
}

impl ToneLexicon {
    pub fn new() -> Self {
        let mut positive = HashMap::new();
        let mut negative = HashMap::new();
        let mut modifiers = HashMap::new();

        let strong_positive = [
            ("amazing", 0.8),
            ("awesome", 0.75),
            ("beautiful", 0.7),
            ("best", 0.8),
            ("blessed", 0.7),
            ("brilliant", 0.8),
            ("excellent", 0.8),
            ("fantastic", 0.8),
            ("great", 0.7),
            ("incredible", 0.85),
            ("love", 0.7),
            ("perfect", 0.8),
            ("thankful", 0.7),
            ("wonderful", 0.8),
            ("win", 0.7),
            ("winner", 0.75),
        ];

        let moderate_positive = [
            ("calm", 0.4),
            ("fun", 0.5),
            ("glad", 0.5),
            ("good", 0.5),
            ("happy", 0.55),
            ("hope", 0.4),
            ("kind", 0.4),
            ("like", 0.3),
            ("lucky", 0.5),
            ("nice", 0.45),
            ("okay", 0.3),
            ("recover", 0.5),
            ("relief", 0.5),
            ("rescued", 0.55),
            ("safe", 0.5),
            ("saved", 0.5),
            ("stable", 0.35),
            ("strong", 0.4),
            ("support", 0.4),
            ("thanks", 0.45),
        ];

        let strong_negative = [
            ("catastrophe", -0.95),
            ("catastrophic", -0.95),
            ("collapse", -0.9),
            ("dead", -0.85),
            ("deadly", -0.85),
            ("death", -0.85),
            ("destroyed", -0.85),
            ("devastating", -0.9),
            ("disaster", -0.9),
            ("fatal", -0.85),
            ("horrible", -0.85),
            ("horrific", -0.9),
            ("killed", -0.85),
            ("massacre", -0.95),
            ("terrible", -0.8),
            ("terror", -0.85),
            ("tragedy", -0.85),
            ("worst", -0.85),
        ];

        let moderate_negative = [
            ("afraid", -0.5),
            ("bad", -0.5),
            ("burning", -0.5),
            ("crash", -0.6),
            ("cry", -0.5),
            ("damage", -0.55),
            ("danger", -0.55),
            ("dangerous", -0.55),
            ("emergency", -0.5),
            ("evacuate", -0.5),
            ("fear", -0.6),
            ("fire", -0.4),
            ("flood", -0.5),
            ("hate", -0.6),
            ("hurt", -0.55),
            ("injured", -0.6),
            ("lost", -0.5),
            ("panic", -0.6),
            ("sad", -0.5),
            ("scared", -0.55),
            ("sick", -0.45),
            ("storm", -0.4),
            ("threat", -0.5),
            ("victim", -0.5),
            ("warning", -0.4),
            ("worried", -0.5),
            ("wreck", -0.55),
        ];

        for (word, score) in strong_positive.iter().chain(moderate_positive.iter()) {
            positive.insert(word.to_string(), *score);
        }
        for (word, score) in strong_negative.iter().chain(moderate_negative.iter()) {
            negative.insert(word.to_string(), *score);
        }

        let modifier_words = [
            ("absolutely", 1.6),
            ("barely", 0.6),
            ("completely", 1.5),
            ("extremely", 1.8),
            ("highly", 1.4),
            ("quite", 1.2),
            ("really", 1.4),
            ("slightly", 0.7),
            ("so", 1.3),
            ("somewhat", 0.8),
            ("totally", 1.4),
            ("very", 1.5),
        ];
        for (word, multiplier) in modifier_words {
            modifiers.insert(word.to_string(), multiplier);
        }

        let negations = [
            "not", "no", "never", "neither", "nobody", "nothing", "nowhere", "dont", "doesnt",
            "didnt", "cant", "cannot", "couldnt", "wont", "wouldnt", "shouldnt", "isnt", "arent",
            "wasnt", "werent", "havent", "hasnt", "hadnt",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            positive,
            negative,
            modifiers,
            negations,
        }
    }

    /// Whether the word negates what follows.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    /// Intensity multiplier of the word, if any.
    pub fn get_modifier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(word).copied()
    }

    /// Add or override a scored word.
    pub fn add_word(&mut self, word: &str, score: f64) {
        let word = word.to_lowercase();
        if score >= 0.0 {
            self.positive.insert(word, score);
        } else {
            self.negative.insert(word, score);
        }
    }
}

impl Default for ToneLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityLexicon for ToneLexicon {
    fn get_score(&self, word: &str) -> Option<f64> {
        self.positive
            .get(word)
            .or_else(|| self.negative.get(word))
            .copied()
    }

    fn contains(&self, word: &str) -> bool {
        self.positive.contains_key(word) || self.negative.contains_key(word)
    }
}
