//! Request/response types for the engine's public operations, per spec §4.7.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use memorai_core::ids::{AgentId, MemoryId, TenantId};
use memorai_core::memory::{EmotionalWeight, Importance, MemoryRecord, MemoryType};

use crate::concurrency::{CancellationToken, Deadline};

/// Caller-supplied overrides for `remember`; `None` fields fall back to the
/// classifier, the default-importance heuristic, or empty/absent values.
#[derive(Default)]
pub struct RememberOptions {
    pub memory_type: Option<MemoryType>,
    pub importance: Option<Importance>,
    pub tags: Vec<String>,
    pub context: Option<HashMap<String, Value>>,
    pub emotional_weight: Option<EmotionalWeight>,
    pub ttl: Option<DateTime<Utc>>,
    pub deadline: Option<std::time::Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl RememberOptions {
    pub(crate) fn deadline(&self) -> Deadline {
        Deadline::new(self.deadline)
    }
}

/// Per-call overrides for `recall`; `None` fields fall back to
/// `RetrievalConfig` defaults.
#[derive(Default)]
pub struct RecallOptions {
    pub memory_type: Option<MemoryType>,
    pub limit: Option<usize>,
    pub threshold: Option<f64>,
    pub time_decay: bool,
    pub deadline: Option<std::time::Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl RecallOptions {
    pub(crate) fn deadline(&self) -> Deadline {
        Deadline::new(self.deadline)
    }
}

/// A record's metadata, with the embedding array stripped per spec §4.7
/// ("strip the embedding array from returned metadata to keep responses
/// compact") and §9 ("embeddings are a distinct value category").
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryView {
    pub id: MemoryId,
    pub tenant_id: TenantId,
    pub agent_id: Option<AgentId>,
    pub memory_type: MemoryType,
    pub content: String,
    pub tags: Vec<String>,
    pub context: Option<HashMap<String, Value>>,
    pub confidence: f64,
    pub importance: f64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub access_count: u64,
}

impl From<&MemoryRecord> for MemoryView {
    fn from(record: &MemoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            tenant_id: record.tenant_id.clone(),
            agent_id: record.agent_id.clone(),
            memory_type: record.memory_type,
            content: record.content.clone(),
            tags: record.tags.clone(),
            context: record.context.clone(),
            confidence: record.confidence.value(),
            importance: record.importance.value(),
            created_at: record.created_at,
            last_accessed_at: record.last_accessed_at,
            access_count: record.access_count,
        }
    }
}

/// One ranked `recall` hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallResult {
    pub memory: MemoryView,
    pub score: f64,
}

/// `recall`'s full response, carrying the `partial` degradation flag from
/// spec §7 ("all other sub-errors degrade to best-effort results with a
/// `partial` flag set in the response").
#[derive(Debug, Clone, Default)]
pub struct RecallResponse {
    pub results: Vec<RecallResult>,
    pub partial: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ContextResponse {
    pub memories: Vec<MemoryView>,
    pub summary: String,
}

#[derive(Debug, Clone, Default)]
pub struct IndexSizes {
    pub keyword_terms: usize,
    pub type_entries: usize,
    pub tag_entries: usize,
    pub vector_points: usize,
}

#[derive(Debug, Clone, Default)]
pub struct StatsResponse {
    pub totals: usize,
    pub by_type: HashMap<MemoryType, usize>,
    pub index_sizes: IndexSizes,
    pub avg_importance: f64,
    pub recent_activity_24h: usize,
}
