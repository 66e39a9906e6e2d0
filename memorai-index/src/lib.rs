//! In-process keyword/type/tag indices, per spec §4.6. `DashMap`/`DashSet`
//! backed for concurrent reads during `recall` and exclusive-enough inserts
//! during `remember`/`forget`, grounded on the teacher's `SessionManager`
//! (`cortex-session/src/manager.rs`, `Arc<DashMap<..>>` with concurrent
//! get/insert/remove).
//!
//! The spec's fourth index — "semantic index, `(id -> (embedding,
//! metadata_without_embedding))`" — has no separate representation here: it
//! is exactly what `memorai-vectorstore`'s `InProcessVectorStore` already
//! stores internally, so this crate implements the three indices that have
//! no `VectorStore` counterpart.
//!
//! Indices are disposable caches: the persistent store owns the durable
//! record, indices hold only ids, and [`Indices::rebuild`] reconstructs all
//! three from a full record scan.

mod tokenize;

use dashmap::{DashMap, DashSet};

use memorai_core::memory::{MemoryRecord, MemoryType};

/// The shared keyword-tokenization rule, exposed so callers can tokenize a
/// query the same way content was tokenized at insertion time.
pub fn keyword_terms(text: &str) -> Vec<String> {
    tokenize::terms(text)
}

/// `term -> set of ids`, plus a reverse `id -> terms` map so removal does
/// not require scanning the whole vocabulary.
#[derive(Default)]
pub struct KeywordIndex {
    terms: DashMap<String, DashSet<String>>,
    terms_by_id: DashMap<String, Vec<String>>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_term(&self, term: &str, id: &str) {
        self.terms.entry(term.to_string()).or_default().insert(id.to_string());
    }

    /// Indexes both `content` and `tags` under the same term vocabulary.
    pub fn insert(&self, id: &str, content: &str, tags: &[String]) {
        let mut terms = tokenize::terms(content);
        for tag in tags {
            terms.extend(tokenize::terms(tag));
        }
        terms.sort();
        terms.dedup();

        for term in &terms {
            self.insert_term(term, id);
        }
        self.terms_by_id.insert(id.to_string(), terms);
    }

    /// Removes `id` from every term it was indexed under; any term whose
    /// set becomes empty is removed entirely.
    pub fn remove(&self, id: &str) {
        let Some((_, terms)) = self.terms_by_id.remove(id) else {
            return;
        };
        for term in terms {
            if let Some(set) = self.terms.get(&term) {
                set.remove(id);
                let is_empty = set.is_empty();
                drop(set);
                if is_empty {
                    self.terms.remove_if(&term, |_, set| set.is_empty());
                }
            }
        }
    }

    pub fn ids_for_term(&self, term: &str) -> Vec<String> {
        self.terms.get(term).map(|set| set.iter().map(|id| id.clone()).collect()).unwrap_or_default()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// The terms `id` was last indexed under, for scoring a keyword hit
    /// against a query's terms. Empty if `id` was never inserted.
    pub fn terms_for_id(&self, id: &str) -> Vec<String> {
        self.terms_by_id.get(id).map(|terms| terms.clone()).unwrap_or_default()
    }
}

/// Exact-match partition by [`MemoryType`].
#[derive(Default)]
pub struct TypeIndex {
    types: DashMap<MemoryType, DashSet<String>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, memory_type: MemoryType) {
        self.types.entry(memory_type).or_default().insert(id.to_string());
    }

    pub fn remove(&self, id: &str, memory_type: MemoryType) {
        if let Some(set) = self.types.get(&memory_type) {
            set.remove(id);
        }
    }

    pub fn ids_for_type(&self, memory_type: MemoryType) -> Vec<String> {
        self.types.get(&memory_type).map(|set| set.iter().map(|id| id.clone()).collect()).unwrap_or_default()
    }
}

/// Exact-match partition by lowercased tag.
#[derive(Default)]
pub struct TagIndex {
    tags: DashMap<String, DashSet<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, tags: &[String]) {
        for tag in tags {
            self.tags.entry(tag.to_lowercase()).or_default().insert(id.to_string());
        }
    }

    pub fn remove(&self, id: &str, tags: &[String]) {
        for tag in tags {
            let lowered = tag.to_lowercase();
            if let Some(set) = self.tags.get(&lowered) {
                set.remove(id);
                if set.is_empty() {
                    drop(set);
                    self.tags.remove_if(&lowered, |_, set| set.is_empty());
                }
            }
        }
    }

    pub fn ids_for_tag(&self, tag: &str) -> Vec<String> {
        self.tags
            .get(&tag.to_lowercase())
            .map(|set| set.iter().map(|id| id.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of distinct lowercased tags currently indexed.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

/// All three record-derived indices, kept in sync with `remember`/`forget`.
#[derive(Default)]
pub struct Indices {
    pub keyword: KeywordIndex,
    pub r#type: TypeIndex,
    pub tag: TagIndex,
}

impl Indices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&self, record: &MemoryRecord) {
        let id = record.id.as_str();
        self.keyword.insert(id, &record.content, &record.tags);
        self.r#type.insert(id, record.memory_type);
        self.tag.insert(id, &record.tags);
    }

    pub fn remove_record(&self, record: &MemoryRecord) {
        let id = record.id.as_str();
        self.keyword.remove(id);
        self.r#type.remove(id, record.memory_type);
        self.tag.remove(id, &record.tags);
    }

    /// Rebuilds all three indices from a full set of records, for use at
    /// startup before the engine accepts operations.
    pub fn rebuild(records: &[MemoryRecord]) -> Self {
        let indices = Self::new();
        for record in records {
            indices.insert_record(record);
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memorai_core::ids::{MemoryId, TenantId};
    use memorai_core::memory::{Confidence, Importance};

    fn record(content: &str, tags: &[&str], memory_type: MemoryType) -> MemoryRecord {
        let now = chrono::Utc::now();
        MemoryRecord {
            id: MemoryId::generate(),
            tenant_id: TenantId::from("t1"),
            agent_id: None,
            memory_type,
            content: content.to_string(),
            embedding: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            context: None,
            confidence: Confidence::new(1.0),
            importance: Importance::new(0.5),
            emotional_weight: None,
            created_at: now,
            updated_at: now,
            last_accessed_at: now,
            access_count: 0,
            ttl: None,
        }
    }

    #[test]
    fn insert_then_lookup_by_keyword() {
        let indices = Indices::new();
        let r = record("rust systems programming", &[], MemoryType::Fact);
        indices.insert_record(&r);
        assert!(indices.keyword.ids_for_term("rust").contains(&r.id.as_str().to_string()));
    }

    #[test]
    fn remove_prunes_empty_term_entries() {
        let indices = Indices::new();
        let r = record("uniqueterm here", &[], MemoryType::Fact);
        indices.insert_record(&r);
        assert!(indices.keyword.term_count() > 0);
        indices.remove_record(&r);
        assert!(indices.keyword.ids_for_term("uniqueterm").is_empty());
    }

    #[test]
    fn type_index_partitions_by_exact_type() {
        let indices = Indices::new();
        let a = record("a fact statement", &[], MemoryType::Fact);
        let b = record("a thread comment", &[], MemoryType::Thread);
        indices.insert_record(&a);
        indices.insert_record(&b);
        let facts = indices.r#type.ids_for_type(MemoryType::Fact);
        assert!(facts.contains(&a.id.as_str().to_string()));
        assert!(!facts.contains(&b.id.as_str().to_string()));
    }

    #[test]
    fn tag_index_is_case_insensitive() {
        let indices = Indices::new();
        let r = record("content", &["Rust"], MemoryType::Fact);
        indices.insert_record(&r);
        assert!(indices.tag.ids_for_tag("rust").contains(&r.id.as_str().to_string()));
    }

    #[test]
    fn terms_for_id_returns_what_was_indexed() {
        let indices = Indices::new();
        let r = record("rust systems programming", &["backend"], MemoryType::Fact);
        indices.insert_record(&r);
        let terms = indices.keyword.terms_for_id(r.id.as_str());
        assert!(terms.contains(&"rust".to_string()));
        assert!(terms.contains(&"backend".to_string()));
    }

    #[test]
    fn keyword_terms_matches_insertion_tokenization() {
        let terms = keyword_terms("Rust-lang systems!");
        assert!(terms.contains(&"rust".to_string()));
        assert!(terms.contains(&"systems".to_string()));
    }

    #[test]
    fn rebuild_reconstructs_indices_from_scratch() {
        let records = vec![
            record("alpha content here", &["x"], MemoryType::Fact),
            record("beta content here", &["y"], MemoryType::Task),
        ];
        let indices = Indices::rebuild(&records);
        assert!(!indices.keyword.ids_for_term("alpha").is_empty());
        assert!(!indices.r#type.ids_for_type(MemoryType::Task).is_empty());
    }
}
