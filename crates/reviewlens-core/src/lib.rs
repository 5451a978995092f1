//! ReviewLens Core: shared error type, sentiment labels, configuration.

pub mod config;
pub mod error;
pub mod sentiment;

pub use config::{DataPaths, EmbedderKind, ReviewLensConfig, TopicParams};
pub use error::{Error, Result};
pub use sentiment::Sentiment;
