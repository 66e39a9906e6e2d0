//! `importance_factor = importance ^ (1 - importance_weight)`.

pub fn calculate(importance: f64, importance_weight: f64) -> f64 {
    importance.max(0.0).powf(1.0 - importance_weight)
}
