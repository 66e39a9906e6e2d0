/// Vector-store errors, per spec §7
/// `VectorStoreError{Init, Upsert, Search, Delete, Count, DimensionMismatch}`.
#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("vector store init failed: {0}")]
    Init(String),

    #[error("vector store upsert failed: {0}")]
    Upsert(String),

    #[error("vector store search failed: {0}")]
    Search(String),

    #[error("vector store delete failed: {0}")]
    Delete(String),

    #[error("vector store count failed: {0}")]
    Count(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
