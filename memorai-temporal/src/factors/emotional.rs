//! `emotional_factor = 1 + |emotional_weight_value| * emotional_weight`.

pub fn calculate(emotional_weight_value: Option<f64>, emotional_weight: f64) -> f64 {
    let magnitude = emotional_weight_value.map(|v| v.abs()).unwrap_or(0.0);
    1.0 + magnitude * emotional_weight
}
