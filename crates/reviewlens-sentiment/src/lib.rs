//! ReviewLens Sentiment: lexicon-based polarity scoring.
//!
//! `SentimentScorer` loads a valence lexicon once and scores normalized
//! review text into a compound score in [-1, 1]. The label follows fixed
//! thresholds: ≥ 0.05 positive, ≤ -0.05 negative, otherwise neutral.

pub mod scorer;

pub use reviewlens_core::Sentiment;
pub use scorer::{PolarityScores, SentimentScorer};
