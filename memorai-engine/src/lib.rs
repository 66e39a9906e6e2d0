//! # memorai-engine
//!
//! Orchestrates the classifier, temporal engine, embedder, vector store,
//! persistent store and indices behind the six public operations of spec
//! §4.7: `initialize`, `remember`, `recall`, `get_context`, `forget`,
//! `get_stats`.
//!
//! Grounded on `cortex-retrieval/src/engine.rs`'s `RetrievalEngine` for the
//! overall staged-pipeline shape (classify/expand → search → rank → pack),
//! generalized to this spec's `remember`/`recall` pair and its literal
//! merge formula rather than RRF (see [`merge`]). The engine holds owned
//! trait objects rather than the teacher's borrowed `&'a dyn` references,
//! since this engine is meant to be shared across threads behind an `Arc`
//! for the concurrent callers described in spec §5.

pub mod concurrency;
mod importance;
mod merge;
mod options;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use rayon::join;

use memorai_core::errors::{MemoraiError, MemoraiResult, VectorStoreError};
use memorai_core::ids::{AgentId, MemoryId, TenantId};
use memorai_core::memory::{Confidence, ListFilter, MemoryRecord, MemoryType, SortBy};
use memorai_core::traits::{Embedder, PersistentStore, VectorPayload, VectorPoint, VectorQuery, VectorStore};
use memorai_core::MemoraiConfig;
use memorai_index::Indices;

pub use concurrency::CancellationToken;
pub use options::{
    ContextResponse, IndexSizes, MemoryView, RecallOptions, RecallResult, RecallResponse, RememberOptions,
    StatsResponse,
};

use concurrency::AdmissionControl;

pub struct MemoraiEngine {
    embedder: Box<dyn Embedder>,
    vector_store: Box<dyn VectorStore>,
    store: Box<dyn PersistentStore>,
    indices: RwLock<Indices>,
    config: MemoraiConfig,
    initialized: AtomicBool,
    admission: AdmissionControl,
}

impl MemoraiEngine {
    pub fn new(
        embedder: Box<dyn Embedder>,
        vector_store: Box<dyn VectorStore>,
        store: Box<dyn PersistentStore>,
        config: MemoraiConfig,
    ) -> Self {
        let admission = AdmissionControl::new(config.concurrency.remember_queue_capacity);
        Self {
            embedder,
            vector_store,
            store,
            indices: RwLock::new(Indices::new()),
            config,
            initialized: AtomicBool::new(false),
            admission,
        }
    }

    /// Wires the workspace's default local implementations (file-per-record
    /// store, TF-IDF embedder, in-process vector store) and runs
    /// `initialize`, mirroring the teacher's convention of an explicit
    /// config struct passed once at construction rather than lazily loaded
    /// globals (§9 Design Notes).
    pub fn open_default(config: MemoraiConfig) -> MemoraiResult<Self> {
        let dimension = config.dimension();
        let data_path = config.storage.resolve_data_path();
        let store = memorai_store::FileStore::open(&data_path, config.concurrency.index_shard_count)?;
        let embedder = memorai_embeddings::LocalEmbedder::new(dimension);
        let vector_store = memorai_vectorstore::InProcessVectorStore::new();

        let engine = Self::new(Box::new(embedder), Box::new(vector_store), Box::new(store), config);
        engine.initialize()?;
        Ok(engine)
    }

    fn ensure_initialized(&self) -> MemoraiResult<()> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(MemoraiError::NotInitialized)
        }
    }

    /// Loads every record from the persistent store, rebuilds the three
    /// in-process indices, reconciles the vector store with any persisted
    /// embedding the vector store may be missing (the recovery path for
    /// "on abrupt termination, startup rebuild restores consistency", §5),
    /// and verifies the vector store is healthy. Idempotent: safe to call
    /// again after a prior successful call.
    pub fn initialize(&self) -> MemoraiResult<()> {
        match self.vector_store.initialize(self.config.dimension()) {
            Ok(()) => {}
            Err(MemoraiError::VectorStore(VectorStoreError::DimensionMismatch { expected, actual })) => {
                return Err(MemoraiError::InitError(format!(
                    "configured dimension {actual} disagrees with the vector store's existing dimension {expected}"
                )));
            }
            Err(e) => return Err(MemoraiError::InitError(e.to_string())),
        }

        let records = self.store.list(&ListFilter::default())?;

        let rebuilt = Indices::rebuild(&records);
        *self.indices.write().expect("indices lock poisoned") = rebuilt;

        let points: Vec<VectorPoint> = records
            .iter()
            .filter_map(|r| {
                r.embedding.clone().map(|vector| VectorPoint {
                    id: r.id.clone(),
                    vector,
                    payload: VectorPayload {
                        tenant_id: r.tenant_id.clone(),
                        agent_id: r.agent_id.clone(),
                        memory_type: r.memory_type,
                        created_at: r.created_at,
                    },
                })
            })
            .collect();
        if let Err(e) = self.vector_store.upsert(&points) {
            return Err(MemoraiError::InitError(format!("failed to reconcile vector store: {e}")));
        }

        if !self.vector_store.health_check() {
            return Err(MemoraiError::InitError("vector store failed health check".to_string()));
        }

        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// See spec §4.7 `remember`.
    pub fn remember(
        &self,
        content: &str,
        tenant_id: TenantId,
        agent_id: Option<AgentId>,
        options: RememberOptions,
    ) -> MemoraiResult<MemoryId> {
        self.ensure_initialized()?;
        let deadline = options.deadline();
        concurrency::check(deadline, options.cancellation.as_ref())?;
        let _permit = self.admission.admit()?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(MemoraiError::InvalidContent);
        }

        let memory_type = match options.memory_type {
            Some(t) => t,
            None => memorai_classifier::classify(trimmed).memory_type,
        };
        let importance = options.importance.unwrap_or_else(|| importance::default_importance(trimmed));

        // Last check before persistence: per §5, a cancellation/timeout
        // observed from here on must not stop the index update that
        // follows a successful write.
        concurrency::check(deadline, options.cancellation.as_ref())?;

        let embedding = match self.embedder.embed(trimmed) {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::warn!(error = %e, "embedder failed during remember; storing without an embedding");
                None
            }
        };

        let now = Utc::now();
        let id = MemoryId::generate();
        let record = MemoryRecord {
            id: id.clone(),
            tenant_id: tenant_id.clone(),
            agent_id: agent_id.clone(),
            memory_type,
            content: trimmed.to_string(),
            embedding: embedding.clone(),
            tags: options.tags,
            context: options.context,
            confidence: Confidence::default(),
            importance,
            emotional_weight: options.emotional_weight,
            created_at: now,
            updated_at: now,
            last_accessed_at: now,
            access_count: 0,
            ttl: options.ttl,
        };

        self.store.store(&record)?;

        self.indices.read().expect("indices lock poisoned").insert_record(&record);

        if let Some(vector) = embedding {
            let point = VectorPoint {
                id: id.clone(),
                vector,
                payload: VectorPayload { tenant_id, agent_id, memory_type, created_at: now },
            };
            if let Err(e) = self.vector_store.upsert(std::slice::from_ref(&point)) {
                tracing::warn!(
                    error = %e,
                    record_id = %id,
                    "vector store upsert failed after persisting; will reconcile on next initialize",
                );
            }
        }

        Ok(id)
    }

    /// See spec §4.7 `recall`.
    pub fn recall(
        &self,
        query: &str,
        tenant_id: &TenantId,
        agent_id: Option<&AgentId>,
        options: &RecallOptions,
    ) -> MemoraiResult<RecallResponse> {
        self.ensure_initialized()?;
        let deadline = options.deadline();
        concurrency::check(deadline, options.cancellation.as_ref())?;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(MemoraiError::InvalidContent);
        }

        let query_terms = memorai_index::keyword_terms(trimmed);
        let indices = self.indices.read().expect("indices lock poisoned");

        let (semantic, keyword) = join(
            || self.semantic_search(trimmed, tenant_id, agent_id, options.memory_type),
            || Ok::<_, MemoraiError>(self.keyword_search(&indices, &query_terms, tenant_id, agent_id, options.memory_type)),
        );
        drop(indices);

        concurrency::check(deadline, options.cancellation.as_ref())?;

        let (semantic_scores, partial) = match semantic {
            Ok(scores) => (scores, false),
            Err(e) => {
                tracing::warn!(error = %e, "semantic search degraded; falling back to keyword-only recall");
                (std::collections::HashMap::new(), true)
            }
        };
        let keyword_scores = keyword?;

        let merged = merge::merge_scores(
            &semantic_scores,
            &keyword_scores,
            self.config.retrieval.semantic_weight,
            self.config.retrieval.keyword_weight,
        );

        let now = Utc::now();
        let mut scored: Vec<(MemoryRecord, f64)> = Vec::with_capacity(merged.len());
        for (id_str, score) in merged {
            let id = MemoryId::from(id_str);
            let Some(record) = self.store.retrieve(&id)? else { continue };
            if record.tenant_id != *tenant_id {
                continue;
            }
            if let Some(a) = agent_id {
                if record.agent_id.as_ref() != Some(a) {
                    continue;
                }
            }
            if let Some(t) = options.memory_type {
                if record.memory_type != t {
                    continue;
                }
            }
            let score = if options.time_decay {
                let adjusted = memorai_temporal::adjusted_confidence(&record, now);
                let raw = record.confidence.value();
                if raw > f64::EPSILON {
                    score * (adjusted / raw)
                } else {
                    0.0
                }
            } else {
                score
            };
            scored.push((record, score));
        }

        merge::rank(&mut scored);

        let threshold = options.threshold.unwrap_or(self.config.retrieval.default_recall_threshold);
        let limit = options.limit.unwrap_or(self.config.retrieval.default_recall_limit);
        scored.retain(|(_, score)| *score >= threshold);
        scored.truncate(limit);

        concurrency::check(deadline, options.cancellation.as_ref())?;

        let mut results = Vec::with_capacity(scored.len());
        for (mut record, score) in scored {
            record.record_access(now);
            if let Err(e) = self.store.store(&record) {
                tracing::warn!(error = %e, record_id = %record.id, "failed to persist access-count update");
            }
            results.push(RecallResult { memory: (&record).into(), score });
        }

        Ok(RecallResponse { results, partial })
    }

    fn semantic_search(
        &self,
        query: &str,
        tenant_id: &TenantId,
        agent_id: Option<&AgentId>,
        memory_type: Option<MemoryType>,
    ) -> MemoraiResult<std::collections::HashMap<String, f64>> {
        let vector = self.embedder.embed(query)?;
        let vector_query = VectorQuery {
            tenant_id: tenant_id.clone(),
            agent_id: agent_id.cloned(),
            memory_type,
            limit: self.config.retrieval.default_recall_limit * 4,
            threshold: 0.0,
        };
        let hits = self.vector_store.search(&vector, &vector_query)?;
        Ok(hits.into_iter().map(|h| (h.id.into_inner(), h.score)).collect())
    }

    fn keyword_search(
        &self,
        indices: &Indices,
        query_terms: &[String],
        tenant_id: &TenantId,
        agent_id: Option<&AgentId>,
        memory_type: Option<MemoryType>,
    ) -> std::collections::HashMap<String, f64> {
        use std::collections::HashSet;

        if query_terms.is_empty() {
            return std::collections::HashMap::new();
        }

        let mut candidates: HashSet<String> = HashSet::new();
        for term in query_terms {
            candidates.extend(indices.keyword.ids_for_term(term));
        }
        if let Some(t) = memory_type {
            let typed: HashSet<String> = indices.r#type.ids_for_type(t).into_iter().collect();
            candidates.retain(|id| typed.contains(id));
        }

        let mut scores = std::collections::HashMap::with_capacity(candidates.len());
        for id in candidates {
            let Ok(Some(record)) = self.store.retrieve(&MemoryId::from(id.clone())) else { continue };
            if record.tenant_id != *tenant_id {
                continue;
            }
            if let Some(a) = agent_id {
                if record.agent_id.as_ref() != Some(a) {
                    continue;
                }
            }
            let record_terms = indices.keyword.terms_for_id(&id);
            let score = merge::keyword_score(query_terms, &record_terms);
            if score > 0.0 {
                scores.insert(id, score);
            }
        }
        scores
    }

    /// See spec §4.7 `get_context`.
    pub fn get_context(
        &self,
        tenant_id: &TenantId,
        agent_id: Option<&AgentId>,
        max: Option<usize>,
    ) -> MemoraiResult<ContextResponse> {
        self.ensure_initialized()?;

        let filter = ListFilter {
            tenant_id: Some(tenant_id.clone()),
            agent_id: agent_id.cloned(),
            memory_type: None,
            limit: None,
            sort_by: Some(SortBy::Accessed),
        };
        let mut records = self.store.list(&filter)?;
        // `list`'s `Accessed` sort is ascending; most-recently-accessed first.
        records.reverse();
        let max = max.unwrap_or(self.config.retrieval.context_max);
        records.truncate(max);

        let mut counts: std::collections::HashMap<MemoryType, usize> = std::collections::HashMap::new();
        for record in &records {
            *counts.entry(record.memory_type).or_default() += 1;
        }
        let mut summary_parts: Vec<String> =
            counts.iter().map(|(t, n)| format!("{n} {t}")).collect();
        summary_parts.sort();
        let summary = if summary_parts.is_empty() {
            "no memories".to_string()
        } else {
            summary_parts.join(", ")
        };

        Ok(ContextResponse { memories: records.iter().map(MemoryView::from).collect(), summary })
    }

    /// See spec §4.7 `forget`. Never raises on an unknown id.
    pub fn forget(&self, id: &MemoryId) -> MemoraiResult<bool> {
        self.ensure_initialized()?;

        let Some(record) = self.store.retrieve(id)? else { return Ok(false) };
        if !self.store.delete(id)? {
            return Ok(false);
        }

        self.indices.read().expect("indices lock poisoned").remove_record(&record);
        if let Err(e) = self.vector_store.delete(std::slice::from_ref(id)) {
            tracing::warn!(error = %e, record_id = %id, "vector store delete failed during forget");
        }

        Ok(true)
    }

    /// See spec §4.7 `get_stats`.
    pub fn get_stats(&self) -> MemoraiResult<StatsResponse> {
        self.ensure_initialized()?;

        let records = self.store.list(&ListFilter::default())?;
        let totals = records.len();

        let mut by_type: std::collections::HashMap<MemoryType, usize> = std::collections::HashMap::new();
        for record in &records {
            *by_type.entry(record.memory_type).or_default() += 1;
        }

        let avg_importance = if totals == 0 {
            0.0
        } else {
            records.iter().map(|r| r.importance.value()).sum::<f64>() / totals as f64
        };

        let cutoff = Utc::now() - chrono::Duration::hours(24);
        let recent_activity_24h = records.iter().filter(|r| r.last_accessed_at >= cutoff).count();
        let vector_points = records.iter().filter(|r| r.embedding.is_some()).count();

        let indices = self.indices.read().expect("indices lock poisoned");
        let type_entries = MemoryType::ALL.iter().map(|t| indices.r#type.ids_for_type(*t).len()).sum();
        let index_sizes = IndexSizes {
            keyword_terms: indices.keyword.term_count(),
            type_entries,
            tag_entries: indices.tag.tag_count(),
            vector_points,
        };

        Ok(StatsResponse { totals, by_type, index_sizes, avg_importance, recent_activity_24h })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memorai_embeddings::LocalEmbedder;
    use memorai_store::FileStore;
    use memorai_vectorstore::InProcessVectorStore;
    use tempfile::tempdir;

    fn engine(dir: &std::path::Path) -> MemoraiEngine {
        let mut config = MemoraiConfig::default();
        config.retrieval.dimension = 64;
        let store = FileStore::open(dir, 4).unwrap();
        let embedder = LocalEmbedder::new(64);
        let vector_store = InProcessVectorStore::new();
        let engine = MemoraiEngine::new(Box::new(embedder), Box::new(vector_store), Box::new(store), config);
        engine.initialize().unwrap();
        engine
    }

    #[test]
    fn remember_then_recall_finds_the_record() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let id = engine
            .remember(
                "Alice prefers dark mode over light mode",
                TenantId::from("t1"),
                None,
                RememberOptions::default(),
            )
            .unwrap();

        let response = engine
            .recall("dark mode", &TenantId::from("t1"), None, &RecallOptions::default())
            .unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].memory.id, id);
        assert_eq!(response.results[0].memory.memory_type, MemoryType::Preference);
        assert!(response.results[0].memory.confidence >= 0.0);
    }

    #[test]
    fn scenario_two_backup_key_ranks_highest() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let tenant = TenantId::from("t1");

        engine
            .remember("Deploy steps: first build then test then ship", tenant.clone(), None, RememberOptions::default())
            .unwrap();
        engine
            .remember("User said the API is slow", tenant.clone(), None, RememberOptions::default())
            .unwrap();
        let backup_id = engine
            .remember("Remember: backup key is XYZ", tenant.clone(), None, RememberOptions::default())
            .unwrap();

        let options = RecallOptions { limit: Some(5), ..Default::default() };
        let response = engine.recall("backup", &tenant, None, &options).unwrap();

        assert_eq!(response.results[0].memory.id, backup_id);
        assert!(response.results[0].memory.importance >= 0.8);
        for other in &response.results[1..] {
            assert!(other.score < response.results[0].score);
        }
    }

    #[test]
    fn forget_removes_record_from_recall_and_stats() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let tenant = TenantId::from("t1");
        let id = engine.remember("x", tenant.clone(), None, RememberOptions::default()).unwrap();

        assert!(engine.forget(&id).unwrap());

        let response = engine.recall("x", &tenant, None, &RecallOptions::default()).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(engine.get_stats().unwrap().totals, 0);
    }

    #[test]
    fn forget_of_unknown_id_returns_false() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        assert!(!engine.forget(&MemoryId::generate()).unwrap());
    }

    #[test]
    fn tenant_isolation_holds_for_identical_content() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let id_a = engine.remember("hello", TenantId::from("t1"), None, RememberOptions::default()).unwrap();
        let id_b = engine.remember("hello", TenantId::from("t2"), None, RememberOptions::default()).unwrap();

        let result_a = engine.recall("hello", &TenantId::from("t1"), None, &RecallOptions::default()).unwrap();
        let result_b = engine.recall("hello", &TenantId::from("t2"), None, &RecallOptions::default()).unwrap();

        assert_eq!(result_a.results.len(), 1);
        assert_eq!(result_b.results.len(), 1);
        assert_eq!(result_a.results[0].memory.id, id_a);
        assert_eq!(result_b.results[0].memory.id, id_b);
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn recall_on_uninitialized_engine_fails() {
        let dir = tempdir().unwrap();
        let mut config = MemoraiConfig::default();
        config.retrieval.dimension = 32;
        let store = FileStore::open(dir.path(), 2).unwrap();
        let embedder = LocalEmbedder::new(32);
        let vector_store = InProcessVectorStore::new();
        let engine = MemoraiEngine::new(Box::new(embedder), Box::new(vector_store), Box::new(store), config);

        let result = engine.recall("anything", &TenantId::from("t1"), None, &RecallOptions::default());
        assert!(matches!(result, Err(MemoraiError::NotInitialized)));
    }

    #[test]
    fn empty_content_is_rejected() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let result = engine.remember("   ", TenantId::from("t1"), None, RememberOptions::default());
        assert!(matches!(result, Err(MemoraiError::InvalidContent)));
    }

    #[test]
    fn get_context_returns_most_recently_accessed_first() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let tenant = TenantId::from("t1");
        engine.remember("first memory", tenant.clone(), None, RememberOptions::default()).unwrap();
        let second = engine.remember("second memory", tenant.clone(), None, RememberOptions::default()).unwrap();

        engine.recall("second", &tenant, None, &RecallOptions::default()).unwrap();

        let context = engine.get_context(&tenant, None, Some(10)).unwrap();
        assert_eq!(context.memories[0].id, second);
    }

    #[test]
    fn get_stats_reflects_remembered_totals() {
        let dir = tempdir().unwrap();
        let engine = engine(dir.path());
        let tenant = TenantId::from("t1");
        for _ in 0..3 {
            engine.remember("a fact about something", tenant.clone(), None, RememberOptions::default()).unwrap();
        }
        let stats = engine.get_stats().unwrap();
        assert_eq!(stats.totals, 3);
        assert_eq!(stats.by_type.values().sum::<usize>(), 3);
    }
}
