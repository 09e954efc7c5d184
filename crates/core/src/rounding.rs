//! Display rounding for derived figures.

/// Round to 2 decimal places.
///
/// Used only for display values; comparisons against thresholds must be done
/// at full precision before rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
