use crate::errors::MemoraiResult;

/// Text → fixed-length-vector contract, per spec §4.1. `D` is engine-wide and
/// constant for the lifetime of a store. Implementations may batch
/// internally; deterministic output for identical input is desirable but not
/// required. Mirrors the teacher's `IEmbeddingProvider`
/// (`cortex-core/src/traits/embedding.rs`).
pub trait Embedder: Send + Sync {
    /// Embed a single text, failing with `MemoraiError::EmbeddingUnavailable`
    /// on transient provider errors.
    fn embed(&self, text: &str) -> MemoraiResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> MemoraiResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality `D` of vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Human-readable provider name, for observability.
    fn name(&self) -> &str;

    /// Whether this embedder is currently able to serve requests.
    fn is_available(&self) -> bool;
}
