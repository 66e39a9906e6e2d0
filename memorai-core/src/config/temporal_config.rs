use serde::{Deserialize, Serialize};

use super::defaults;

/// Temporal-decay/lifecycle configuration, per spec §4.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    pub archive_threshold: f64,
    pub forget_threshold: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            archive_threshold: defaults::DEFAULT_ARCHIVE_THRESHOLD,
            forget_threshold: defaults::DEFAULT_FORGET_THRESHOLD,
        }
    }
}
