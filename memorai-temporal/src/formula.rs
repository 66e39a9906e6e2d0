//! The six-factor multiplicative decay formula, grounded on the teacher's
//! `formula::compute`/`compute_breakdown` pair (`cortex-decay/src/formula.rs`)
//! but implementing this spec's exact parameter set and factor shapes rather
//! than the teacher's 5-factor citation/pattern formula.

use chrono::{DateTime, Utc};

use memorai_core::memory::MemoryRecord;

use crate::factors;
use crate::parameters::DecayParameters;

/// Per-factor breakdown, kept as an observability aid mirroring the
/// teacher's `DecayBreakdown`.
#[derive(Debug, Clone)]
pub struct DecayBreakdown {
    pub base_confidence: f64,
    pub age_decay: f64,
    pub idle_decay: f64,
    pub importance_factor: f64,
    pub frequency_factor: f64,
    pub emotional_factor: f64,
    pub adjusted_confidence: f64,
}

/// `adjusted = confidence * age_decay * idle_decay * importance_factor *
/// frequency_factor * emotional_factor`, clamped to `[0, 1]`.
pub fn compute(record: &MemoryRecord, params: &DecayParameters, now: DateTime<Utc>) -> f64 {
    compute_breakdown(record, params, now).adjusted_confidence
}

pub fn compute_breakdown(record: &MemoryRecord, params: &DecayParameters, now: DateTime<Utc>) -> DecayBreakdown {
    let base_confidence = record.confidence.value();
    let age_decay = factors::age::calculate(record.created_at, now, params.base_decay_rate_per_day);
    let idle_decay = factors::idle::calculate(record.last_accessed_at, now, params.base_decay_rate_per_day);
    let importance_factor = factors::importance::calculate(record.importance.value(), params.importance_weight);
    let frequency_factor = factors::frequency::calculate(record.access_count, params.frequency_weight);
    let emotional_factor = factors::emotional::calculate(
        record.emotional_weight.map(|w| w.value()),
        params.emotional_weight,
    );

    let raw = base_confidence
        * age_decay
        * idle_decay
        * importance_factor
        * frequency_factor
        * emotional_factor;

    DecayBreakdown {
        base_confidence,
        age_decay,
        idle_decay,
        importance_factor,
        frequency_factor,
        emotional_factor,
        adjusted_confidence: raw.clamp(0.0, 1.0),
    }
}
