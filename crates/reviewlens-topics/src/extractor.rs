//! Topic extraction: embed → cluster → reduce → keywords → rank.

use std::sync::Arc;

use ndarray::Array1;
use reviewlens_core::{Result, Sentiment, TopicParams};
use reviewlens_infer::EmbedderBackend;
use tracing::{debug, info};

use crate::cluster::{reduce_clusters, Hdbscan};
use crate::ctfidf::class_keywords;
use crate::types::Topic;

/// Stateless between calls; the embedder is shared read-only.
pub struct TopicExtractor {
    embedder: Arc<dyn EmbedderBackend>,
}

impl TopicExtractor {
    pub fn new(embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &Arc<dyn EmbedderBackend> {
        &self.embedder
    }

    /// Extract up to `params.top_k` topics from one slice of normalized texts.
    ///
    /// Outliers are never reported. An empty slice yields no topics and
    /// performs no embedding.
    pub fn extract(
        &self,
        texts: &[&str],
        sentiment: Sentiment,
        params: &TopicParams,
    ) -> Result<Vec<Topic>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings: Vec<Array1<f32>> = self
            .embedder
            .embed_batch(texts)?
            .into_iter()
            .map(|r| r.embedding)
            .collect();

        let labels = Hdbscan::new(params.min_cluster_size).fit(&embeddings);
        let found = labels.iter().filter(|&&l| l >= 0).max().map_or(0, |m| m + 1);
        let labels = reduce_clusters(&labels, &embeddings, params.target_topic_count);

        let cluster_count = labels.iter().copied().max().map_or(0, |m| (m + 1).max(0) as usize);
        let mut sizes: Vec<(usize, usize)> = (0..cluster_count).map(|id| (id, 0)).collect();
        for &label in labels.iter().filter(|&&l| l >= 0) {
            sizes[label as usize].1 += 1;
        }

        let mut keywords = class_keywords(texts, &labels, params.keywords_per_topic);
        let topics: Vec<Topic> = rank_by_population(&sizes)
            .into_iter()
            .take(params.top_k)
            .enumerate()
            .map(|(i, (id, size))| Topic {
                rank: i + 1,
                sentiment,
                size,
                keywords: keywords.remove(&(id as i32)).unwrap_or_default(),
            })
            .collect();

        debug!(
            "{} slice: {} texts, {} clusters found, {} after reduction",
            sentiment,
            texts.len(),
            found,
            sizes.len()
        );
        info!(
            "Extracted {} {} topics with {} embedder",
            topics.len(),
            sentiment,
            self.embedder.name()
        );
        Ok(topics)
    }
}

/// Sort `(cluster_id, population)` pairs by population, largest first.
/// Equal populations keep the lower cluster id first.
pub fn rank_by_population(sizes: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut ranked = sizes.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}
