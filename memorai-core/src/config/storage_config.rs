use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistent-store subsystem configuration, per spec §4.3/§6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the persistent store. When `None`, the engine falls
    /// back to the platform data-path default (§6): the `MEMORAI_DATA_PATH`
    /// environment override, or else the per-user application-data
    /// directory with subpath `Memorai/data/memory`.
    pub data_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_path: None }
    }
}

impl StorageConfig {
    /// Resolve the effective data directory, per spec §6 "Platform data-path
    /// defaults". Honors an environment override before falling back to the
    /// per-user application-data directory.
    pub fn resolve_data_path(&self) -> PathBuf {
        if let Some(path) = &self.data_path {
            return path.clone();
        }
        if let Ok(env_path) = std::env::var(defaults::DEFAULT_DATA_PATH_ENV) {
            return PathBuf::from(env_path);
        }
        dirs_data_dir().join(defaults::DEFAULT_DATA_SUBPATH)
    }
}

/// Minimal per-user application-data directory resolution, without taking on
/// a `dirs`-crate dependency the teacher's storage layer never needed (the
/// teacher targets a single SQLite file path supplied by the caller, see
/// `cortex-core/src/config/storage_config.rs::db_path`). Falls back to the
/// current directory when no platform convention can be determined.
fn dirs_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata);
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_path_wins_over_env_and_platform_default() {
        let cfg = StorageConfig {
            data_path: Some(PathBuf::from("/tmp/explicit")),
        };
        assert_eq!(cfg.resolve_data_path(), PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn env_override_is_honored_when_no_explicit_path() {
        std::env::set_var(defaults::DEFAULT_DATA_PATH_ENV, "/tmp/env-path");
        let cfg = StorageConfig::default();
        assert_eq!(cfg.resolve_data_path(), PathBuf::from("/tmp/env-path"));
        std::env::remove_var(defaults::DEFAULT_DATA_PATH_ENV);
    }
}
