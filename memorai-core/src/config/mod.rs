pub mod concurrency_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod storage_config;
pub mod temporal_config;

use serde::{Deserialize, Serialize};

pub use concurrency_config::ConcurrencyConfig;
pub use embedding_config::{EmbeddingConfig, EmbeddingProvider};
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;
pub use temporal_config::TemporalConfig;

/// Top-level configuration aggregating all subsystem configs, explicitly
/// constructed and passed to `initialize` rather than loaded lazily at
/// import time (§9 Design Notes) — mirrors `cortex-core::config::CortexConfig`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemoraiConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub temporal: TemporalConfig,
    pub observability: ObservabilityConfig,
    pub concurrency: ConcurrencyConfig,
}

impl MemoraiConfig {
    /// Load config from a TOML string, falling back to defaults for missing
    /// fields — mirrors `CortexConfig::from_toml`.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn dimension(&self) -> usize {
        self.retrieval.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = MemoraiConfig::from_toml("").unwrap();
        assert_eq!(cfg.retrieval.dimension, defaults::DEFAULT_DIMENSION);
        assert_eq!(cfg.temporal.forget_threshold, defaults::DEFAULT_FORGET_THRESHOLD);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let toml_str = r#"
            [retrieval]
            dimension = 512
        "#;
        let cfg = MemoraiConfig::from_toml(toml_str).unwrap();
        assert_eq!(cfg.retrieval.dimension, 512);
        assert_eq!(
            cfg.retrieval.default_recall_limit,
            defaults::DEFAULT_RECALL_LIMIT
        );
    }
}
