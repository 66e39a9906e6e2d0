/// Persistent-store errors, per spec §7 `PersistenceError{Read, Write, Corrupt}`.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read record {id}: {reason}")]
    Read { id: String, reason: String },

    #[error("failed to write record {id}: {reason}")]
    Write { id: String, reason: String },

    #[error("record {id} is corrupt and was quarantined: {reason}")]
    Corrupt { id: String, reason: String },
}
