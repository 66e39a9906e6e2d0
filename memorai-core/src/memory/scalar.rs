//! Clamped scalar newtypes, grounded on the teacher's `Confidence` wrapper
//! (`cortex-core/src/memory/confidence.rs`): a bare `f64` that is always kept
//! in its documented range rather than re-validated at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Importance(f64);

impl Importance {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(0.5)
    }
}

impl From<f64> for Importance {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

/// Signed affective magnitude, per spec §3 `emotional_weight? ∈ [-1,1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EmotionalWeight(f64);

impl EmotionalWeight {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn magnitude(self) -> f64 {
        self.0.abs()
    }
}

impl From<f64> for EmotionalWeight {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}
