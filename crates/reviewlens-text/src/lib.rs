//! ReviewLens Text: deterministic review text normalization.
//!
//! Turns one raw review field into a canonical lowercase, lemmatized,
//! stopword-free string. Every step is a total function; absent input
//! yields an empty string.

pub mod lemmatizer;
pub mod normalize;
pub mod stopwords;

pub use lemmatizer::Lemmatizer;
pub use normalize::{token_count, Normalizer, MIN_TOKEN_LEN};
pub use stopwords::ENGLISH_STOPWORDS;
