use serde::{Deserialize, Serialize};

use super::defaults;

/// Ambient logging/tracing configuration, carried regardless of the spec's
/// Non-goals (those scope out moderation/access-control features, not
/// observability) — mirrors `cortex-core/src/config/observability_config.rs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub tracing_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            tracing_enabled: defaults::DEFAULT_TRACING_ENABLED,
        }
    }
}
