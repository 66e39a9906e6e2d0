//! Tracing subscriber setup, grounded directly on the teacher's
//! `cortex-observability/src/tracing_setup/mod.rs::init_tracing`.
//!
//! The workspace is library-only (no `bin` target owns a process lifetime),
//! so this is exposed for a consuming binary or test harness to call once at
//! startup rather than invoked automatically.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Initializes the global tracing subscriber per `config`, honoring
/// `config.tracing_enabled` and falling back to `config.log_level` when no
/// `MEMORAI_LOG` environment filter is set. A no-op when tracing is
/// disabled or a subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) {
    if !config.tracing_enabled {
        return;
    }
    let filter =
        EnvFilter::try_from_env("MEMORAI_LOG").unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).json().try_init();
}

/// Initializes tracing with an explicit filter string, for tests or
/// embedding contexts that want to bypass the environment variable.
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(filter)).json().try_init();
}
