use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{AgentId, MemoryId, TenantId};

use super::scalar::{Confidence, EmotionalWeight, Importance};
use super::types::MemoryType;

/// The universal persisted unit, per spec §3. One record per `id`; indices
/// hold references to it but never own its lifetime (§4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: MemoryId,
    pub tenant_id: TenantId,
    pub agent_id: Option<AgentId>,
    pub memory_type: MemoryType,
    pub content: String,
    /// Present only when the embedder has successfully run for this content;
    /// absent when it may be regenerated on demand (§3) or when embedding
    /// failed at write time (§4.7 `remember` failure semantics).
    pub embedding: Option<Vec<f32>>,
    pub tags: Vec<String>,
    pub context: Option<HashMap<String, Value>>,
    pub confidence: Confidence,
    pub importance: Importance,
    pub emotional_weight: Option<EmotionalWeight>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub access_count: u64,
    pub ttl: Option<DateTime<Utc>>,
}

impl MemoryRecord {
    /// Whether `now` is past this record's absolute expiry, if any.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.ttl.is_some_and(|ttl| now >= ttl)
    }

    /// Case-insensitive tag lookup, per spec §3 ("case-insensitive on lookup,
    /// original case preserved").
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Bump access bookkeeping: `update_access`, inlined on the record so both
    /// the engine and the temporal engine can apply it identically (§4.5).
    pub fn record_access(&mut self, now: DateTime<Utc>) {
        self.last_accessed_at = now;
        self.updated_at = now;
        self.access_count = self.access_count.saturating_add(1);
    }
}

/// Sort key for `PersistentStore::list`, per spec §4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Created,
    Updated,
    Accessed,
}

/// Filter predicate for `PersistentStore::list`, per spec §4.3.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tenant_id: Option<TenantId>,
    pub agent_id: Option<AgentId>,
    pub memory_type: Option<MemoryType>,
    pub limit: Option<usize>,
    pub sort_by: Option<SortBy>,
}

impl ListFilter {
    pub fn matches(&self, record: &MemoryRecord) -> bool {
        if let Some(t) = &self.tenant_id {
            if &record.tenant_id != t {
                return false;
            }
        }
        if let Some(a) = &self.agent_id {
            if record.agent_id.as_ref() != Some(a) {
                return false;
            }
        }
        if let Some(ty) = self.memory_type {
            if record.memory_type != ty {
                return false;
            }
        }
        true
    }
}

/// Explicit-metadata partial update, per spec §4.7 `update(id, partial)`.
/// `None` fields are left untouched; `updated_at` is always refreshed by the
/// store regardless of which fields changed.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub context: Option<HashMap<String, Value>>,
    pub confidence: Option<Confidence>,
    pub importance: Option<Importance>,
    pub emotional_weight: Option<EmotionalWeight>,
    pub embedding: Option<Option<Vec<f32>>>,
    pub ttl: Option<Option<DateTime<Utc>>>,
}

impl RecordUpdate {
    pub fn apply(self, record: &mut MemoryRecord, now: DateTime<Utc>) {
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
        if let Some(context) = self.context {
            record.context = Some(context);
        }
        if let Some(confidence) = self.confidence {
            record.confidence = confidence;
        }
        if let Some(importance) = self.importance {
            record.importance = importance;
        }
        if let Some(emotional_weight) = self.emotional_weight {
            record.emotional_weight = Some(emotional_weight);
        }
        if let Some(embedding) = self.embedding {
            record.embedding = embedding;
        }
        if let Some(ttl) = self.ttl {
            record.ttl = ttl;
        }
        record.updated_at = now;
    }
}
