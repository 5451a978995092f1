//! Topic types.

use reviewlens_core::Sentiment;
use serde::{Deserialize, Serialize};

/// One extracted topic for a sentiment slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// 1-based position by population within its slice, contiguous after
    /// filtering.
    pub rank: usize,
    /// Sentiment of the slice the topic came from.
    pub sentiment: Sentiment,
    /// Number of reviews assigned to the topic.
    pub size: usize,
    /// Keywords, most representative first.
    pub keywords: Vec<String>,
}
