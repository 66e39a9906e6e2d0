use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid-recall subsystem configuration, per spec §4.7/§6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Embedding dimension `D`; must match the embedder and vector store (§6).
    pub dimension: usize,
    pub default_recall_limit: usize,
    pub default_recall_threshold: f64,
    pub semantic_weight: f64,
    pub keyword_weight: f64,
    pub context_max: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            dimension: defaults::DEFAULT_DIMENSION,
            default_recall_limit: defaults::DEFAULT_RECALL_LIMIT,
            default_recall_threshold: defaults::DEFAULT_RECALL_THRESHOLD,
            semantic_weight: defaults::DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            context_max: defaults::DEFAULT_CONTEXT_MAX,
        }
    }
}
