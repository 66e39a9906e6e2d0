mod memorai_error;
mod storage_error;
mod vector_error;

pub use memorai_error::{MemoraiError, MemoraiResult};
pub use storage_error::StorageError;
pub use vector_error::VectorStoreError;
