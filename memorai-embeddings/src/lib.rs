//! Deterministic local embedding provider, per spec §4.1. Ported from the
//! teacher's `TfIdfFallback` (`cortex-embeddings/src/providers/tfidf_fallback.rs`):
//! FNV-1a term hashing into fixed-dimension buckets, a length-based IDF
//! approximation, L2 normalization. No network calls, no model weights —
//! always available.

use std::collections::HashMap;

use memorai_core::errors::{MemoraiError, MemoraiResult};
use memorai_core::traits::Embedder;

pub struct LocalEmbedder {
    dimension: usize,
}

impl LocalEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimension];
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        let mut vector = vec![0.0f32; self.dimension];

        for (term, count) in &tf {
            let freq = count / total;
            let idf = 1.0 + (term.len() as f32).ln();
            let bucket = Self::hash_term(term, self.dimension);
            vector[bucket] += freq * idf;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

impl Embedder for LocalEmbedder {
    fn embed(&self, text: &str) -> MemoraiResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(MemoraiError::InvalidContent);
        }
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> MemoraiResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        "local-tfidf"
    }

    fn is_available(&self) -> bool {
        true
    }
}
