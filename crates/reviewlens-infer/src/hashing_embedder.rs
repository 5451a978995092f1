//! Signed feature-hashing embedder.
//!
//! Each token is hashed into one of `dim` buckets with a ±1 sign; the
//! vector is the L2-normalized sum. Texts sharing vocabulary land close in
//! cosine space. Fully deterministic: no model files, no randomness.

use ndarray::Array1;
use rayon::prelude::*;
use reviewlens_core::Result;
use sha2::{Digest, Sha256};

use crate::embedder::{EmbedderBackend, EmbeddingResult};

pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());
        let mut idx_bytes = [0u8; 8];
        idx_bytes.copy_from_slice(&digest[..8]);
        let idx = (u64::from_le_bytes(idx_bytes) % self.dim as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (idx, sign)
    }

    fn vectorize(&self, text: &str) -> Array1<f32> {
        let mut v = Array1::<f32>::zeros(self.dim);
        for token in text.split_whitespace() {
            let (idx, sign) = self.bucket(token);
            v[idx] += sign;
        }
        let norm = v.dot(&v).sqrt();
        if norm > 0.0 {
            v /= norm;
        }
        v
    }
}

impl EmbedderBackend for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingResult> {
        Ok(EmbeddingResult {
            embedding: self.vectorize(text),
            cached: false,
        })
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingResult>> {
        // par_iter preserves input order on collect
        texts.par_iter().map(|t| self.embed(t)).collect()
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}
