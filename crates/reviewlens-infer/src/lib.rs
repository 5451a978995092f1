//! ReviewLens Infer: frozen sentence-embedding backends.
//!
//! Provides the `EmbedderBackend` trait used by topic extraction.
//! With the `onnx` feature and model files present, `OnnxEmbedder` loads
//! all-MiniLM-L6-v2 for 384-dim embeddings. `HashingEmbedder` is a
//! deterministic bag-of-words backend, opt-in via `REVIEWLENS_EMBEDDER=hashing`.

pub mod cache;
pub mod embedder;
pub mod hashing_embedder;
pub mod onnx_embedder;

pub use cache::EmbeddingCache;
pub use embedder::{cosine_similarity, EmbedderBackend, EmbeddingResult};
pub use hashing_embedder::HashingEmbedder;

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;

use std::path::Path;
use std::sync::Arc;

use reviewlens_core::{EmbedderKind, Error, Result};

/// Create the configured embedder.
///
/// A backend that cannot be initialized is a `ResourceUnavailable` error;
/// callers treat it as fatal at startup rather than degrading silently.
pub fn create_embedder(
    kind: EmbedderKind,
    model_dir: &Path,
    dim: usize,
) -> Result<Arc<dyn EmbedderBackend>> {
    match kind {
        EmbedderKind::Hashing => {
            tracing::info!("Using hashing embedder (dim={})", dim);
            Ok(Arc::new(HashingEmbedder::new(dim)))
        }
        EmbedderKind::Onnx => load_onnx(model_dir),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(model_dir: &Path) -> Result<Arc<dyn EmbedderBackend>> {
    let embedder = OnnxEmbedder::load(model_dir).map_err(Error::ResourceUnavailable)?;
    tracing::info!("Using ONNX embedder (dim={})", embedder.dimension());
    Ok(Arc::new(embedder))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(model_dir: &Path) -> Result<Arc<dyn EmbedderBackend>> {
    Err(Error::ResourceUnavailable(format!(
        "ONNX embedder requested for {} but this build lacks the `onnx` feature",
        model_dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hashing() {
        let e = create_embedder(EmbedderKind::Hashing, Path::new("unused"), 64).unwrap();
        assert_eq!(e.dimension(), 64);
        assert_eq!(e.name(), "hashing");
    }

    #[test]
    fn test_onnx_without_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_embedder(EmbedderKind::Onnx, dir.path(), 384)
            .err()
            .unwrap();
        assert!(matches!(err, Error::ResourceUnavailable(_)));
    }
}
