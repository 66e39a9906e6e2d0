//! Hybrid-recall scoring: keyword coverage, the weighted semantic/keyword
//! merge rule, and the tie-break cascade, per spec §4.7.
//!
//! Grounded on the shape of the teacher's `cortex-retrieval/src/search/
//! rrf_fusion.rs::fuse` (accumulate per-id scores in a map, then sort) —
//! but NOT its reciprocal-rank formula. The merge rule here is the one the
//! spec documents literally: `max(existing, existing + keyword * 0.3)`,
//! including the Open Question about whether its additive cap on
//! contrived inputs is intentional (§9).

use std::cmp::Ordering;
use std::collections::HashMap;

use memorai_core::memory::MemoryRecord;

/// Fraction of `query_terms` present in `record_terms`, in `[0, 1]`. The
/// source specifies only that a keyword hit produces *a* score; this
/// coverage ratio is the simplest well-defined one and is covered by
/// property tests (see `tests/engine_properties.rs`).
pub fn keyword_score(query_terms: &[String], record_terms: &[String]) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let hits = query_terms.iter().filter(|t| record_terms.contains(t)).count();
    hits as f64 / query_terms.len() as f64
}

/// Merges semantic and keyword contributions per spec §4.7's documented
/// rule. `semantic` and `keyword` are each `id -> raw score in [0, 1]`
/// *before* weighting; this function applies `semantic_weight`/
/// `keyword_weight` itself.
pub fn merge_scores(
    semantic: &HashMap<String, f64>,
    keyword: &HashMap<String, f64>,
    semantic_weight: f64,
    keyword_weight: f64,
) -> HashMap<String, f64> {
    let mut merged: HashMap<String, f64> = HashMap::new();

    for (id, score) in semantic {
        merged.insert(id.clone(), score * semantic_weight);
    }

    for (id, score) in keyword {
        let keyword_contribution = score * keyword_weight;
        merged
            .entry(id.clone())
            .and_modify(|existing| *existing = existing.max(*existing + keyword_contribution))
            .or_insert(keyword_contribution);
    }

    merged
}

/// Ties broken by more-recent `last_accessed_at`, then larger `importance`,
/// then lexicographic id, per spec §4.7 "Ranking edge cases".
pub fn rank(results: &mut [(MemoryRecord, f64)]) {
    results.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.last_accessed_at.cmp(&a.last_accessed_at))
            .then_with(|| b.importance.value().partial_cmp(&a.importance.value()).unwrap_or(Ordering::Equal))
            .then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use memorai_core::ids::{MemoryId, TenantId};
    use memorai_core::memory::{Confidence, Importance, MemoryType};
    use proptest::prelude::*;

    #[test]
    fn keyword_only_hit_scores_coverage_ratio() {
        let query = vec!["rust".to_string(), "systems".to_string()];
        let record = vec!["rust".to_string(), "other".to_string()];
        assert_eq!(keyword_score(&query, &record), 0.5);
    }

    #[test]
    fn semantic_only_result_keeps_its_weighted_score() {
        let semantic = HashMap::from([("a".to_string(), 0.8)]);
        let keyword = HashMap::new();
        let merged = merge_scores(&semantic, &keyword, 0.7, 0.3);
        assert_eq!(merged["a"], 0.8 * 0.7);
    }

    #[test]
    fn keyword_only_result_is_weighted_directly() {
        let semantic = HashMap::new();
        let keyword = HashMap::from([("a".to_string(), 0.5)]);
        let merged = merge_scores(&semantic, &keyword, 0.7, 0.3);
        assert_eq!(merged["a"], 0.5 * 0.3);
    }

    #[test]
    fn combined_hit_follows_documented_cap_rule() {
        let semantic = HashMap::from([("a".to_string(), 0.8)]);
        let keyword = HashMap::from([("a".to_string(), 1.0)]);
        let merged = merge_scores(&semantic, &keyword, 0.7, 0.3);
        let existing = 0.8 * 0.7;
        let expected = existing.max(existing + 1.0 * 0.3);
        assert_eq!(merged["a"], expected);
    }

    fn tied_record(id: &str, importance: f64, last_accessed_at: chrono::DateTime<Utc>) -> MemoryRecord {
        MemoryRecord {
            id: MemoryId::from(id.to_string()),
            tenant_id: TenantId::from("t1"),
            agent_id: None,
            memory_type: MemoryType::Fact,
            content: "x".to_string(),
            embedding: None,
            tags: vec![],
            context: None,
            confidence: Confidence::new(0.5),
            importance: Importance::new(importance),
            emotional_weight: None,
            created_at: last_accessed_at,
            updated_at: last_accessed_at,
            last_accessed_at,
            access_count: 0,
            ttl: None,
        }
    }

    proptest! {
        #[test]
        fn higher_importance_never_ranks_below_a_tied_rival(
            score in 0.0f64..=1.0,
            lower_importance in 0.0f64..0.9,
            importance_gain in 0.0001f64..0.1,
        ) {
            let higher_importance = lower_importance + importance_gain;
            let now = Utc::now();

            let mut results = vec![
                (tied_record("a", lower_importance, now), score),
                (tied_record("b", higher_importance, now), score),
            ];
            rank(&mut results);

            let position_of = |id: &str| results.iter().position(|(record, _)| record.id.as_str() == id).unwrap();
            // "b" has importance >= "a"'s, every other tie-break input equal, so "b"
            // must not rank worse than "a".
            prop_assert!(position_of("b") <= position_of("a"));
        }
    }
}
