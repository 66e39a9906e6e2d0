//! `age_decay = exp(-base_rate * age_days)`.

use chrono::{DateTime, Utc};

pub fn calculate(created_at: DateTime<Utc>, now: DateTime<Utc>, base_rate: f64) -> f64 {
    let age_days = (now - created_at).num_seconds().max(0) as f64 / 86_400.0;
    (-base_rate * age_days).exp()
}
