//! ReviewLens Topics: from a slice of normalized reviews to ranked keyword topics.
//!
//! `TopicExtractor` embeds texts, clusters them with HDBSCAN, merges down to
//! a target topic count and labels each cluster with c-TF-IDF keywords.
//! `TopicFilter` then strips review boilerplate and brand names.

pub mod cluster;
pub mod ctfidf;
pub mod extractor;
pub mod filter;
pub mod types;

pub use cluster::{reduce_clusters, Hdbscan, NOISE};
pub use ctfidf::class_keywords;
pub use extractor::{rank_by_population, TopicExtractor};
pub use filter::{TopicFilter, EXCLUDED_TERMS, MIN_TOPIC_KEYWORDS};
pub use types::Topic;
