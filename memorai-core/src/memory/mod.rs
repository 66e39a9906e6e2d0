mod record;
mod scalar;
mod types;

pub use record::{ListFilter, MemoryRecord, RecordUpdate, SortBy};
pub use scalar::{Confidence, EmotionalWeight, Importance};
pub use types::MemoryType;
