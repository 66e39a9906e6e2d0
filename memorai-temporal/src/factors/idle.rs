//! `idle_decay = exp(-base_rate * idle_days * 0.5)`.

use chrono::{DateTime, Utc};

pub fn calculate(last_accessed_at: DateTime<Utc>, now: DateTime<Utc>, base_rate: f64) -> f64 {
    let idle_days = (now - last_accessed_at).num_seconds().max(0) as f64 / 86_400.0;
    (-base_rate * idle_days * 0.5).exp()
}
