//! Single source of truth for all default values, mirroring the teacher's
//! `cortex-core/src/config/defaults.rs`.

// --- Engine / retrieval (§6 "Engine-level configuration") ---
pub const DEFAULT_DIMENSION: usize = 256;
pub const DEFAULT_RECALL_LIMIT: usize = 10;
pub const DEFAULT_RECALL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.7;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.3;
pub const DEFAULT_CONTEXT_MAX: usize = 10;

// --- Temporal engine (§4.5) ---
pub const DEFAULT_ARCHIVE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_FORGET_THRESHOLD: f64 = 0.05;

// --- Storage (§4.3, §6) ---
pub const DEFAULT_DATA_SUBPATH: &str = "Memorai/data/memory";
pub const DEFAULT_DATA_PATH_ENV: &str = "MEMORAI_DATA_PATH";

// --- Embedding provider precedence (§6) ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "local";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TRACING_ENABLED: bool = true;

// --- Concurrency / backpressure (§5) ---
pub const DEFAULT_REMEMBER_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_INDEX_SHARD_COUNT: usize = 16;
