//! Shared application state.

use std::sync::Arc;

use reviewlens_core::{ReviewLensConfig, Result};
use reviewlens_infer::{create_embedder, EmbedderBackend};
use reviewlens_query::QueryService;
use reviewlens_topics::{TopicExtractor, TopicFilter};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: ReviewLensConfig,
    pub query: QueryService,
}

impl AppState {
    pub fn new(config: ReviewLensConfig, embedder: Arc<dyn EmbedderBackend>) -> Self {
        let query = QueryService::new(
            TopicExtractor::new(embedder),
            TopicFilter::review_noise(),
            config.topics.clone(),
            config.data_paths.dataset_file.clone(),
        );
        Self { config, query }
    }

    /// Build state with the configured embedder. Fails with
    /// `ResourceUnavailable` when the embedder cannot be loaded.
    pub fn from_config(config: ReviewLensConfig) -> Result<Self> {
        let embedder = create_embedder(
            config.embedder,
            &config.data_paths.models,
            config.embedding_dim,
        )?;
        Ok(Self::new(config, embedder))
    }

    pub fn embedder(&self) -> &Arc<dyn EmbedderBackend> {
        self.query.extractor().embedder()
    }
}
