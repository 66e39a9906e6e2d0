//! `frequency_factor = log(access_count + 2) * frequency_weight` (additive
//! via log — access count compresses through a logarithm before scaling).

pub fn calculate(access_count: u64, frequency_weight: f64) -> f64 {
    ((access_count as f64) + 2.0).ln() * frequency_weight
}
