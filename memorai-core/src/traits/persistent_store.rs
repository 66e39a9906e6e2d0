use crate::errors::MemoraiResult;
use crate::ids::MemoryId;
use crate::memory::{ListFilter, MemoryRecord, RecordUpdate};

/// Durable key-value store for `MemoryRecord`, per spec §4.3. Typically one
/// file per record in a dedicated directory, fsync'd on write. Mirrors the
/// teacher's `IMemoryStorage` (`cortex-core/src/traits/storage.rs`), trimmed
/// to the CRUD/list surface this spec actually names — relationship/link/
/// causal-graph operations have no counterpart here and are not carried
/// forward.
pub trait PersistentStore: Send + Sync {
    /// Atomic for a single record (write to a temporary name, then rename).
    /// After successful return the record is visible to subsequent
    /// `retrieve` calls on any process reading the same directory.
    fn store(&self, record: &MemoryRecord) -> MemoraiResult<()>;

    fn retrieve(&self, id: &MemoryId) -> MemoraiResult<Option<MemoryRecord>>;

    /// Read-modify-write guarded by a per-id lock; `updated_at` is refreshed.
    fn update(&self, id: &MemoryId, partial: RecordUpdate) -> MemoraiResult<Option<MemoryRecord>>;

    /// Removes the file; missing id returns `false`.
    fn delete(&self, id: &MemoryId) -> MemoraiResult<bool>;

    fn list(&self, filter: &ListFilter) -> MemoraiResult<Vec<MemoryRecord>>;

    /// Total number of records currently stored.
    fn count(&self) -> MemoraiResult<usize>;
}
