// Utility functions

/// Rounds a monetary value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `count` in `total` as a whole percentage, rounded half away from
/// zero. Returns 0 when `total` is zero.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
