//! In-process nearest-neighbor index, per spec §4.2. Brute-force cosine
//! similarity over a `DashMap`, grounded on the teacher's SQLite fallback
//! path `cortex-storage/src/queries/vector_search.rs::search_vector`
//! (manual cosine computation, zero-norm early exit) generalized into a
//! standalone `VectorStore` implementation per §9's "tiered engines"
//! redesign note: one engine, a pluggable store, not structural tiers.
//!
//! Map keys go through [`idmap`] rather than the raw `MemoryId` string, per
//! the redesign note calling for an explicit id-mapping function (with a
//! round-trip invariant) in place of ad-hoc id munging at call sites. This
//! in-process backend would accept arbitrary ids directly, but routing
//! through `idmap` here is what a narrower-id-syntax backend (a UUID-only
//! remote vector DB, say) would actually need.

mod idmap;

use std::sync::RwLock;

use dashmap::DashMap;
use rayon::prelude::*;

use memorai_core::errors::{MemoraiResult, VectorStoreError};
use memorai_core::ids::{MemoryId, TenantId};
use memorai_core::traits::{VectorPayload, VectorPoint, VectorQuery, VectorSearchResult, VectorStore};

struct StoredPoint {
    vector: Vec<f32>,
    payload: VectorPayload,
}

/// Default in-process implementation of [`VectorStore`].
pub struct InProcessVectorStore {
    points: DashMap<String, StoredPoint>,
    dimension: RwLock<Option<usize>>,
}

impl InProcessVectorStore {
    pub fn new() -> Self {
        Self {
            points: DashMap::new(),
            dimension: RwLock::new(None),
        }
    }

    fn expected_dimension(&self) -> MemoraiResult<usize> {
        self.dimension
            .read()
            .expect("dimension lock poisoned")
            .ok_or_else(|| VectorStoreError::Init("store has not been initialized".to_string()).into())
    }
}

impl Default for InProcessVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorStore for InProcessVectorStore {
    fn initialize(&self, dimension: usize) -> MemoraiResult<()> {
        let mut guard = self.dimension.write().expect("dimension lock poisoned");
        if let Some(existing) = *guard {
            if existing != dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: existing,
                    actual: dimension,
                }
                .into());
            }
        } else {
            *guard = Some(dimension);
        }
        Ok(())
    }

    fn upsert(&self, points: &[VectorPoint]) -> MemoraiResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let expected = self.expected_dimension()?;
        for point in points {
            if point.vector.len() != expected {
                return Err(VectorStoreError::DimensionMismatch {
                    expected,
                    actual: point.vector.len(),
                }
                .into());
            }
        }
        for point in points {
            self.points.insert(
                idmap::map(&point.id),
                StoredPoint {
                    vector: point.vector.clone(),
                    payload: point.payload.clone(),
                },
            );
        }
        Ok(())
    }

    fn search(&self, vector: &[f32], query: &VectorQuery) -> MemoraiResult<Vec<VectorSearchResult>> {
        let expected = self.expected_dimension()?;
        if vector.len() != expected {
            return Err(VectorStoreError::DimensionMismatch {
                expected,
                actual: vector.len(),
            }
            .into());
        }

        let candidates: Vec<(String, Vec<f32>, VectorPayload)> = self
            .points
            .iter()
            .filter(|entry| {
                let payload = &entry.value().payload;
                payload.tenant_id == query.tenant_id
                    && query.agent_id.as_ref().map_or(true, |a| payload.agent_id.as_ref() == Some(a))
                    && query.memory_type.map_or(true, |t| payload.memory_type == t)
            })
            .map(|entry| (entry.key().clone(), entry.value().vector.clone(), entry.value().payload.clone()))
            .collect();

        tracing::debug!(candidates = candidates.len(), tenant_id = %query.tenant_id, "scanning vector candidates");

        let mut scored: Vec<VectorSearchResult> = candidates
            .par_iter()
            .map(|(id, stored_vector, _)| VectorSearchResult {
                id: idmap::unmap(id),
                score: cosine_similarity(vector, stored_vector),
            })
            .filter(|result| result.score >= query.threshold)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(query.limit);
        Ok(scored)
    }

    fn delete(&self, ids: &[MemoryId]) -> MemoraiResult<()> {
        for id in ids {
            self.points.remove(&idmap::map(id));
        }
        Ok(())
    }

    fn count(&self, tenant_id: &TenantId) -> MemoraiResult<usize> {
        Ok(self.points.iter().filter(|e| &e.value().payload.tenant_id == tenant_id).count())
    }

    fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use memorai_core::memory::MemoryType;

    fn payload(tenant: &str) -> VectorPayload {
        VectorPayload {
            tenant_id: TenantId::from(tenant),
            agent_id: None,
            memory_type: MemoryType::Fact,
            created_at: Utc::now(),
        }
    }

    fn point(id: &str, vector: Vec<f32>, tenant: &str) -> VectorPoint {
        VectorPoint {
            id: MemoryId::from(id.to_string()),
            vector,
            payload: payload(tenant),
        }
    }

    #[test]
    fn search_before_initialize_fails() {
        let store = InProcessVectorStore::new();
        let err = store.search(&[1.0, 0.0], &VectorQuery {
            tenant_id: TenantId::from("t1"),
            agent_id: None,
            memory_type: None,
            limit: 10,
            threshold: 0.0,
        });
        assert!(err.is_err());
    }

    #[test]
    fn upsert_rejects_dimension_mismatch() {
        let store = InProcessVectorStore::new();
        store.initialize(3).unwrap();
        let err = store.upsert(&[point("a", vec![1.0, 0.0], "t1")]);
        assert!(err.is_err());
    }

    #[test]
    fn empty_upsert_is_a_no_op() {
        let store = InProcessVectorStore::new();
        store.initialize(3).unwrap();
        store.upsert(&[]).unwrap();
        assert_eq!(store.count(&TenantId::from("t1")).unwrap(), 0);
    }

    #[test]
    fn search_returns_closest_match_first() {
        let store = InProcessVectorStore::new();
        store.initialize(2).unwrap();
        store
            .upsert(&[
                point("a", vec![1.0, 0.0], "t1"),
                point("b", vec![0.0, 1.0], "t1"),
                point("c", vec![0.9, 0.1], "t1"),
            ])
            .unwrap();

        let results = store
            .search(&[1.0, 0.0], &VectorQuery {
                tenant_id: TenantId::from("t1"),
                agent_id: None,
                memory_type: None,
                limit: 2,
                threshold: 0.0,
            })
            .unwrap();

        assert_eq!(results[0].id, MemoryId::from("a".to_string()));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_respects_tenant_isolation() {
        let store = InProcessVectorStore::new();
        store.initialize(2).unwrap();
        store.upsert(&[point("a", vec![1.0, 0.0], "t1"), point("b", vec![1.0, 0.0], "t2")]).unwrap();

        let results = store
            .search(&[1.0, 0.0], &VectorQuery {
                tenant_id: TenantId::from("t1"),
                agent_id: None,
                memory_type: None,
                limit: 10,
                threshold: 0.0,
            })
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, MemoryId::from("a".to_string()));
    }

    #[test]
    fn delete_is_best_effort_for_missing_ids() {
        let store = InProcessVectorStore::new();
        store.initialize(2).unwrap();
        store.delete(&[MemoryId::from("missing".to_string())]).unwrap();
    }

    #[test]
    fn zero_norm_query_scores_zero_not_nan() {
        let store = InProcessVectorStore::new();
        store.initialize(2).unwrap();
        store.upsert(&[point("a", vec![1.0, 0.0], "t1")]).unwrap();

        let results = store
            .search(&[0.0, 0.0], &VectorQuery {
                tenant_id: TenantId::from("t1"),
                agent_id: None,
                memory_type: None,
                limit: 10,
                threshold: -1.0,
            })
            .unwrap();

        assert!(results.iter().all(|r| !r.score.is_nan()));
    }
}
