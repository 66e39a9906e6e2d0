use super::{StorageError, VectorStoreError};

/// Top-level error type for the Memorai memory engine.
/// All subsystem errors convert into this via `From` impls, mirroring the
/// teacher's `CortexError` aggregation pattern (see
/// `cortex-core/tests/errors_test.rs` for the per-subsystem `#[from]`
/// conversions this mirrors).
#[derive(Debug, thiserror::Error)]
pub enum MemoraiError {
    #[error("content or query is empty after trimming")]
    InvalidContent,

    #[error("engine operation invoked before initialize()")]
    NotInitialized,

    #[error("embedder unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("vector store error: {0}")]
    VectorStore(#[from] VectorStoreError),

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("not found: {id}")]
    NotFound { id: String },

    #[error("operation timed out after deadline")]
    Timeout,

    #[error("engine overloaded: backlog queue is full")]
    Overloaded,

    #[error("operation cancelled")]
    Cancelled,

    #[error("unrecoverable startup failure: {0}")]
    InitError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type MemoraiResult<T> = Result<T, MemoraiError>;
