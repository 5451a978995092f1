//! LRU cache for embedding results.
//!
//! Reviews repeat across queries (the same product slice is re-queried),
//! so the ONNX embedder keeps recent vectors keyed by normalized text.
//! The model is frozen, so entries never go stale; only capacity evicts.

use std::collections::HashMap;

use ndarray::Array1;
use parking_lot::Mutex;

/// Thread-safe LRU cache for embeddings.
pub struct EmbeddingCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Array1<f32>>,
    order: Vec<String>,
    max_size: usize,
}

impl EmbeddingCache {
    /// Create a new cache with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size,
            }),
        }
    }

    /// Two full sentiment slices fit without eviction.
    pub fn default_cache() -> Self {
        Self::new(1000)
    }

    /// Get a cached embedding and mark it most recently used.
    pub fn get(&self, text: &str) -> Option<Array1<f32>> {
        let mut inner = self.inner.lock();
        let embedding = inner.entries.get(text)?.clone();
        if let Some(pos) = inner.order.iter().position(|k| k == text) {
            let key = inner.order.remove(pos);
            inner.order.push(key);
        }
        Some(embedding)
    }

    /// Insert an embedding into the cache.
    pub fn put(&self, text: String, embedding: Array1<f32>) {
        let mut inner = self.inner.lock();
        if inner.max_size == 0 {
            return;
        }

        if inner.entries.contains_key(&text) {
            inner.entries.insert(text.clone(), embedding);
            inner.order.retain(|k| k != &text);
            inner.order.push(text);
            return;
        }

        while inner.entries.len() >= inner.max_size && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.entries.remove(&oldest);
        }

        inner.order.push(text.clone());
        inner.entries.insert(text, embedding);
    }

    /// Number of entries in the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = EmbeddingCache::new(10);
        assert!(cache.get("battery drain").is_none());

        cache.put("battery drain".into(), array![1.0, 2.0, 3.0]);
        assert_eq!(cache.get("battery drain").unwrap(), array![1.0, 2.0, 3.0]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let cache = EmbeddingCache::new(2);
        cache.put("a".into(), array![1.0]);
        cache.put("b".into(), array![2.0]);

        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").is_some());
        cache.put("c".into(), array![3.0]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let cache = EmbeddingCache::new(0);
        cache.put("a".into(), array![1.0]);
        assert!(cache.is_empty());
    }
}
