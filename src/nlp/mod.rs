//! Text processing: tokenization, stop words, vocabulary and
//! document-term encoding

pub mod encoder;
pub mod stopwords;
pub mod tokenizer;
pub mod vocabulary;

pub use encoder::DocumentTermEncoder;
pub use stopwords::is_stop_word;
pub use tokenizer::WordTokenizer;
pub use vocabulary::{Vocabulary, VocabularyBuilder, VocabularyError};
