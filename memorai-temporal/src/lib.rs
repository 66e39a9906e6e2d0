//! Temporal decay and lifecycle policy, per spec §4.5: time-adjusted
//! confidence, archive/forget predicates, and access-tracking mutation.
//! Grounded on the teacher's `cortex-decay` crate (`formula.rs`,
//! `archival.rs`, `factors/*.rs`) generalized to this spec's exact
//! six-factor formula and per-type parameter set.

pub mod factors;
pub mod formula;
pub mod parameters;

use chrono::{DateTime, Utc};

use memorai_core::memory::MemoryRecord;

pub use formula::DecayBreakdown;
pub use parameters::DecayParameters;

/// Time-adjusted confidence for `record` as of `now`, per the formula in
/// §4.5. Does not mutate `record`.
pub fn adjusted_confidence(record: &MemoryRecord, now: DateTime<Utc>) -> f64 {
    let params = parameters::default_parameters(record.memory_type);
    formula::compute(record, &params, now)
}

/// Per-factor breakdown of [`adjusted_confidence`], for observability.
pub fn adjusted_confidence_breakdown(record: &MemoryRecord, now: DateTime<Utc>) -> DecayBreakdown {
    let params = parameters::default_parameters(record.memory_type);
    formula::compute_breakdown(record, &params, now)
}

/// `adjusted_confidence(record, now) < archive_threshold`.
pub fn should_archive(record: &MemoryRecord, now: DateTime<Utc>, archive_threshold: f64) -> bool {
    adjusted_confidence(record, now) < archive_threshold
}

/// TTL elapsed, or `adjusted_confidence(record, now) < forget_threshold`.
pub fn should_forget(record: &MemoryRecord, now: DateTime<Utc>, forget_threshold: f64) -> bool {
    record.is_expired(now) || adjusted_confidence(record, now) < forget_threshold
}

/// Records an access: `last_accessed_at = now`, `updated_at = now`,
/// `access_count += 1`.
pub fn update_access(record: &mut MemoryRecord, now: DateTime<Utc>) {
    record.record_access(now);
}
