//! ReviewLens Dataset: raw shards in, one cleaned, labeled snapshot out.
//!
//! `DatasetBuilder` reads every raw shard, keeps the target locale,
//! normalizes and labels each review, drops degenerate rows, and replaces
//! the persisted snapshot atomically.

pub mod builder;
pub mod raw;
pub mod snapshot;
pub mod stats;

pub use builder::{normalize_product_name, BuildOptions, BuildReport, DatasetBuilder, MIN_REVIEW_TOKENS};
pub use raw::{discover_shards, read_shard, RawReview};
pub use snapshot::{read_snapshot, write_snapshot, CleanedReview, SNAPSHOT_COLUMNS};
pub use stats::{DatasetStats, SentimentCounts};
