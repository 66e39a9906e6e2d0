use serde::{Deserialize, Serialize};

use super::defaults;

/// Concurrency and backpressure configuration, per spec §5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Bounded queue capacity in front of `remember`. `None` disables
    /// backpressure (unbounded acceptance).
    pub remember_queue_capacity: Option<usize>,
    /// Number of shards backing per-id locks and index maps.
    pub index_shard_count: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            remember_queue_capacity: Some(defaults::DEFAULT_REMEMBER_QUEUE_CAPACITY),
            index_shard_count: defaults::DEFAULT_INDEX_SHARD_COUNT,
        }
    }
}
