//! Per-type decay parameters, mirroring the shape of the teacher's
//! `half_life_days` table (`cortex-core/src/memory/half_lives.rs`), but
//! carrying the four-parameter set this spec's formula actually uses instead
//! of a single half-life. Defaults follow a monotone ordering: `personality`
//! decays slowest, `thread` fastest, `task`/`procedure` in the middle.

use memorai_core::memory::MemoryType;

#[derive(Debug, Clone, Copy)]
pub struct DecayParameters {
    pub importance_weight: f64,
    pub frequency_weight: f64,
    pub emotional_weight: f64,
    pub base_decay_rate_per_day: f64,
}

/// Default parameters for a memory type. Ordered by `base_decay_rate_per_day`
/// ascending: personality < fact < preference < procedure < task < emotion <
/// thread.
pub fn default_parameters(memory_type: MemoryType) -> DecayParameters {
    match memory_type {
        MemoryType::Personality => DecayParameters {
            importance_weight: 0.9,
            frequency_weight: 0.3,
            emotional_weight: 0.2,
            base_decay_rate_per_day: 0.0015,
        },
        MemoryType::Fact => DecayParameters {
            importance_weight: 0.7,
            frequency_weight: 0.2,
            emotional_weight: 0.1,
            base_decay_rate_per_day: 0.006,
        },
        MemoryType::Preference => DecayParameters {
            importance_weight: 0.6,
            frequency_weight: 0.3,
            emotional_weight: 0.2,
            base_decay_rate_per_day: 0.01,
        },
        MemoryType::Procedure => DecayParameters {
            importance_weight: 0.6,
            frequency_weight: 0.4,
            emotional_weight: 0.1,
            base_decay_rate_per_day: 0.015,
        },
        MemoryType::Task => DecayParameters {
            importance_weight: 0.4,
            frequency_weight: 0.3,
            emotional_weight: 0.1,
            base_decay_rate_per_day: 0.025,
        },
        MemoryType::Emotion => DecayParameters {
            importance_weight: 0.3,
            frequency_weight: 0.2,
            emotional_weight: 0.6,
            base_decay_rate_per_day: 0.05,
        },
        MemoryType::Thread => DecayParameters {
            importance_weight: 0.2,
            frequency_weight: 0.2,
            emotional_weight: 0.1,
            base_decay_rate_per_day: 0.15,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personality_decays_slower_than_thread() {
        let personality = default_parameters(MemoryType::Personality);
        let thread = default_parameters(MemoryType::Thread);
        assert!(personality.base_decay_rate_per_day < thread.base_decay_rate_per_day);
    }

    #[test]
    fn task_and_procedure_sit_between_the_extremes() {
        let personality = default_parameters(MemoryType::Personality);
        let thread = default_parameters(MemoryType::Thread);
        for mid in [MemoryType::Task, MemoryType::Procedure] {
            let params = default_parameters(mid);
            assert!(params.base_decay_rate_per_day > personality.base_decay_rate_per_day);
            assert!(params.base_decay_rate_per_day < thread.base_decay_rate_per_day);
        }
    }
}
