//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Paths to all ReviewLens data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Raw review shards (`data/raw/`).
    pub raw: PathBuf,
    /// Persisted dataset snapshot (`data/reviews_preprocessed.csv`).
    pub dataset_file: PathBuf,
    /// Embedding model and tokenizer (`data/models/`).
    pub models: PathBuf,
}

impl DataPaths {
    /// Derive data paths from a root directory. Nothing is created on disk.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            raw: root.join("raw"),
            dataset_file: root.join("reviews_preprocessed.csv"),
            models: root.join("models"),
            root,
        }
    }

    /// Create the directories the builder writes into.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        if let Some(parent) = self.dataset_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

/// Which embedding backend the topic extractor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    /// SentenceTransformers ONNX model (all-MiniLM-L6-v2).
    Onnx,
    /// Deterministic feature-hashing bag of words.
    Hashing,
}

impl EmbedderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "onnx" => Ok(Self::Onnx),
            "hashing" => Ok(Self::Hashing),
            other => Err(Error::Config(format!(
                "REVIEWLENS_EMBEDDER must be 'onnx' or 'hashing', got '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Onnx => write!(f, "onnx"),
            Self::Hashing => write!(f, "hashing"),
        }
    }
}

/// Knobs for topic extraction over one sentiment slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicParams {
    /// Smallest group of reviews that counts as a topic.
    pub min_cluster_size: usize,
    /// Clusters are merged until at most this many remain.
    pub target_topic_count: usize,
    /// Number of topics returned per slice.
    pub top_k: usize,
    /// Ranked keywords kept per topic before filtering.
    pub keywords_per_topic: usize,
    /// Maximum reviews per sentiment slice.
    pub slice_cap: usize,
}

impl Default for TopicParams {
    fn default() -> Self {
        Self {
            min_cluster_size: 30,
            target_topic_count: 10,
            top_k: 5,
            keywords_per_topic: 10,
            slice_cap: 300,
        }
    }
}

/// Top-level ReviewLens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLensConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Locale filter: language code kept by the builder.
    pub target_language: String,
    /// Locale filter: country code kept by the builder.
    pub target_country: String,
    /// File-name prefix identifying raw shards.
    pub shard_prefix: String,
    /// Embedding backend.
    pub embedder: EmbedderKind,
    /// Embedding dimension (384 for all-MiniLM-L6-v2).
    pub embedding_dim: usize,
    /// Optional replacement sentiment lexicon (JSON object word → valence).
    pub lexicon_path: Option<PathBuf>,
    /// Wall-clock budget for one topic query.
    pub query_timeout_secs: u64,
    /// Topic extraction parameters.
    pub topics: TopicParams,
}

impl ReviewLensConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(data_dir: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", p)))?,
            None => 3004,
        };

        let embedder = match lookup("REVIEWLENS_EMBEDDER") {
            Some(v) => EmbedderKind::parse(&v)?,
            None => EmbedderKind::Onnx,
        };

        let query_timeout_secs = match lookup("REVIEWLENS_QUERY_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| {
                Error::Config(format!("REVIEWLENS_QUERY_TIMEOUT_SECS is not a number: {}", v))
            })?,
            None => 120,
        };

        Ok(Self {
            port,
            data_paths: DataPaths::new(data_dir),
            target_language: lookup("REVIEWLENS_LANGUAGE").unwrap_or_else(|| "en".into()),
            target_country: lookup("REVIEWLENS_COUNTRY").unwrap_or_else(|| "us".into()),
            shard_prefix: lookup("REVIEWLENS_SHARD_PREFIX")
                .unwrap_or_else(|| "phone_user_review_file_".into()),
            embedder,
            embedding_dim: 384,
            lexicon_path: lookup("REVIEWLENS_LEXICON").map(PathBuf::from),
            query_timeout_secs,
            topics: TopicParams::default(),
        })
    }
}
