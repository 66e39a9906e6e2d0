use chrono::{DateTime, Utc};

use crate::errors::MemoraiResult;
use crate::ids::{AgentId, MemoryId, TenantId};
use crate::memory::MemoryType;

/// Filterable payload carried alongside a vector, per spec §4.2 "Payload at
/// minimum carries `tenant_id`, `type`, `created_at`".
#[derive(Debug, Clone)]
pub struct VectorPayload {
    pub tenant_id: TenantId,
    pub agent_id: Option<AgentId>,
    pub memory_type: MemoryType,
    pub created_at: DateTime<Utc>,
}

/// One point to upsert: `(id, vector, payload)`, per spec §4.2.
#[derive(Debug, Clone)]
pub struct VectorPoint {
    pub id: MemoryId,
    pub vector: Vec<f32>,
    pub payload: VectorPayload,
}

/// Search parameters, per spec §4.2 `search(vector, query)`.
#[derive(Debug, Clone)]
pub struct VectorQuery {
    pub tenant_id: TenantId,
    pub agent_id: Option<AgentId>,
    pub memory_type: Option<MemoryType>,
    pub limit: usize,
    pub threshold: f64,
}

/// A single scored hit, ordered by descending cosine similarity.
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    pub id: MemoryId,
    pub score: f64,
}

/// Nearest-neighbor index keyed by id, per spec §4.2. Abstracts a remote
/// vector database; `memorai-vectorstore` ships the in-process default.
/// Mirrors the teacher's storage-layer `search_vector`
/// (`cortex-storage/src/queries/vector_search.rs`) generalized into a
/// standalone contract, per §9's "tiered engines" redesign note (one engine,
/// pluggable store — not structural tiers).
pub trait VectorStore: Send + Sync {
    /// Idempotent; creates/verifies the underlying collection with dimension
    /// `dimension` and cosine distance.
    fn initialize(&self, dimension: usize) -> MemoraiResult<()>;

    /// Empty `points` is a no-op. Dimension mismatch fails with
    /// `VectorStoreError::DimensionMismatch`.
    fn upsert(&self, points: &[VectorPoint]) -> MemoraiResult<()>;

    /// Returns results sorted by descending cosine similarity, up to
    /// `query.limit`, omitting results below `query.threshold`.
    fn search(&self, vector: &[f32], query: &VectorQuery) -> MemoraiResult<Vec<VectorSearchResult>>;

    /// Best effort; missing ids are not an error. Empty `ids` is a no-op.
    fn delete(&self, ids: &[MemoryId]) -> MemoraiResult<()>;

    fn count(&self, tenant_id: &TenantId) -> MemoraiResult<usize>;

    fn health_check(&self) -> bool;
}
