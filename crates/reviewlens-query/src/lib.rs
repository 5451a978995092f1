//! ReviewLens Query: product keyword in, positive and negative topics out.

pub mod service;

pub use service::{slice_by_keyword, QueryOutcome, QueryService, SentimentSlices, TopicsReport};
