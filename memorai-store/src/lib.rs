//! File-per-record persistent store, per spec §4.3. Each `MemoryRecord` is
//! one JSON file in a dedicated directory; writes go through a temp file and
//! `rename` for atomicity, mirroring the teacher's file-backend atomic-write
//! pattern. Per-id locking for `update`'s read-modify-write is a fixed
//! shard array (see [`shard_locks`]), grounded on the teacher's `ReadPool`
//! connection pool but hash-indexed instead of round-robin.
//!
//! The teacher's own persistent store (`cortex-storage`) is SQLite-backed;
//! this crate keeps its *discipline* — atomicity, startup recovery, per-id
//! locking — but changes the *medium* to flat files per this spec's explicit
//! §4.3/§6 requirement.

mod shard_locks;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;

use memorai_core::errors::{MemoraiResult, StorageError};
use memorai_core::ids::MemoryId;
use memorai_core::memory::{ListFilter, MemoryRecord, RecordUpdate, SortBy};
use memorai_core::traits::PersistentStore;

use shard_locks::ShardLocks;

const RECORDS_SUBDIR: &str = "records";
const QUARANTINE_SUBDIR: &str = "quarantine";

pub struct FileStore {
    records_dir: PathBuf,
    quarantine_dir: PathBuf,
    locks: ShardLocks,
}

impl FileStore {
    /// Opens (creating if necessary) a file store rooted at `dir`, and scans
    /// it for partially-written or corrupt files, quarantining each rather
    /// than dropping it silently, per spec §4.3.
    pub fn open(dir: impl AsRef<Path>, shard_count: usize) -> MemoraiResult<Self> {
        let root = dir.as_ref();
        let records_dir = root.join(RECORDS_SUBDIR);
        let quarantine_dir = root.join(QUARANTINE_SUBDIR);
        fs::create_dir_all(&records_dir).map_err(|e| StorageError::Write {
            id: "<init>".to_string(),
            reason: e.to_string(),
        })?;
        fs::create_dir_all(&quarantine_dir).map_err(|e| StorageError::Write {
            id: "<init>".to_string(),
            reason: e.to_string(),
        })?;

        let store = Self {
            records_dir,
            quarantine_dir,
            locks: ShardLocks::new(shard_count),
        };
        store.quarantine_unreadable_files()?;
        Ok(store)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.records_dir.join(format!("{id}.json"))
    }

    fn temp_path_for(&self, id: &str) -> PathBuf {
        self.records_dir.join(format!("{id}.json.tmp"))
    }

    fn quarantine_unreadable_files(&self) -> MemoraiResult<()> {
        let entries = match fs::read_dir(&self.records_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(()),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown").to_string();
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    if serde_json::from_str::<MemoryRecord>(&contents).is_err() {
                        self.quarantine(&path, &stem, "invalid or partially written JSON");
                    }
                }
                Err(e) => self.quarantine(&path, &stem, &e.to_string()),
            }
        }
        Ok(())
    }

    fn quarantine(&self, path: &Path, id: &str, reason: &str) {
        warn!(record_id = %id, reason, "quarantining unreadable record file");
        let dest = self.quarantine_dir.join(format!("{id}.json"));
        let _ = fs::rename(path, dest);
    }

    fn write_record(&self, record: &MemoryRecord) -> MemoraiResult<()> {
        let id = record.id.as_str();
        let json = serde_json::to_vec_pretty(record)?;

        let temp_path = self.temp_path_for(id);
        let mut file = fs::File::create(&temp_path).map_err(|e| StorageError::Write {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        use std::io::Write as _;
        file.write_all(&json).map_err(|e| StorageError::Write {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        file.sync_all().map_err(|e| StorageError::Write {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        fs::rename(&temp_path, self.path_for(id)).map_err(|e| StorageError::Write {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn read_record(&self, id: &str) -> MemoraiResult<Option<MemoryRecord>> {
        let path = self.path_for(id);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        };

        match serde_json::from_str::<MemoryRecord>(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                self.quarantine(&path, id, &e.to_string());
                Err(StorageError::Corrupt {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    fn scan_all(&self) -> MemoraiResult<Vec<MemoryRecord>> {
        let mut records = Vec::new();
        let entries = match fs::read_dir(&self.records_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok(records),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Ok(contents) = fs::read_to_string(&path) {
                if let Ok(record) = serde_json::from_str::<MemoryRecord>(&contents) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }
}

impl PersistentStore for FileStore {
    fn store(&self, record: &MemoryRecord) -> MemoraiResult<()> {
        let id = record.id.as_str().to_string();
        self.locks.with_lock(&id, || self.write_record(record))
    }

    fn retrieve(&self, id: &MemoryId) -> MemoraiResult<Option<MemoryRecord>> {
        self.read_record(id.as_str())
    }

    fn update(&self, id: &MemoryId, partial: RecordUpdate) -> MemoraiResult<Option<MemoryRecord>> {
        let id_str = id.as_str().to_string();
        self.locks.with_lock(&id_str, || {
            let mut record = match self.read_record(&id_str)? {
                Some(r) => r,
                None => return Ok(None),
            };
            partial.apply(&mut record, Utc::now());
            self.write_record(&record)?;
            Ok(Some(record))
        })
    }

    fn delete(&self, id: &MemoryId) -> MemoraiResult<bool> {
        let id_str = id.as_str().to_string();
        self.locks.with_lock(&id_str, || {
            let path = self.path_for(&id_str);
            match fs::remove_file(&path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(StorageError::Write {
                    id: id_str.clone(),
                    reason: e.to_string(),
                }
                .into()),
            }
        })
    }

    fn list(&self, filter: &ListFilter) -> MemoraiResult<Vec<MemoryRecord>> {
        let mut records: Vec<MemoryRecord> = self
            .scan_all()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();

        match filter.sort_by {
            Some(SortBy::Created) => records.sort_by_key(|r| r.created_at),
            Some(SortBy::Updated) => records.sort_by_key(|r| r.updated_at),
            Some(SortBy::Accessed) => records.sort_by_key(|r| r.last_accessed_at),
            None => {}
        }

        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    fn count(&self) -> MemoraiResult<usize> {
        Ok(self.scan_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memorai_core::ids::TenantId;
    use memorai_core::memory::{Confidence, Importance, MemoryType};
    use tempfile::tempdir;

    fn sample(id: MemoryId, tenant: &str) -> MemoryRecord {
        let now = Utc::now();
        MemoryRecord {
            id,
            tenant_id: TenantId::from(tenant),
            agent_id: None,
            memory_type: MemoryType::Fact,
            content: "hello".to_string(),
            embedding: None,
            tags: vec![],
            context: None,
            confidence: Confidence::new(0.9),
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
    fn store_then_retrieve_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        let record = sample(MemoryId::generate(), "t1");
        store.store(&record).unwrap();

        let fetched = store.retrieve(&record.id).unwrap().unwrap();
        assert_eq!(fetched.id, record.id);
        assert_eq!(fetched.content, record.content);
    }

    #[test]
    fn retrieve_missing_id_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        assert!(store.retrieve(&MemoryId::generate()).unwrap().is_none());
    }

    #[test]
    fn update_refreshes_updated_at_and_applies_partial() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        let record = sample(MemoryId::generate(), "t1");
        store.store(&record).unwrap();

        let update = RecordUpdate {
            content: Some("changed".to_string()),
            ..Default::default()
        };
        let updated = store.update(&record.id, update).unwrap().unwrap();
        assert_eq!(updated.content, "changed");
        assert!(updated.updated_at >= record.updated_at);
    }

    #[test]
    fn update_of_missing_id_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        let result = store.update(&MemoryId::generate(), RecordUpdate::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn delete_missing_id_returns_false() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        assert!(!store.delete(&MemoryId::generate()).unwrap());
    }

    #[test]
    fn delete_existing_record_returns_true_and_removes_it() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        let record = sample(MemoryId::generate(), "t1");
        store.store(&record).unwrap();

        assert!(store.delete(&record.id).unwrap());
        assert!(store.retrieve(&record.id).unwrap().is_none());
    }

    #[test]
    fn list_filters_by_tenant() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        store.store(&sample(MemoryId::generate(), "t1")).unwrap();
        store.store(&sample(MemoryId::generate(), "t2")).unwrap();

        let filter = ListFilter {
            tenant_id: Some(TenantId::from("t1")),
            ..Default::default()
        };
        let results = store.list(&filter).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tenant_id, TenantId::from("t1"));
    }

    #[test]
    fn count_reflects_stored_records() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path(), 4).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        store.store(&sample(MemoryId::generate(), "t1")).unwrap();
        store.store(&sample(MemoryId::generate(), "t1")).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn startup_scan_quarantines_corrupt_files_instead_of_dropping_them() {
        let dir = tempdir().unwrap();
        let records_dir = dir.path().join("records");
        fs::create_dir_all(&records_dir).unwrap();
        fs::write(records_dir.join("broken-id.json"), b"{ not valid json").unwrap();

        let store = FileStore::open(dir.path(), 4).unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let quarantined = dir.path().join("quarantine").join("broken-id.json");
        assert!(quarantined.exists());
    }
}
