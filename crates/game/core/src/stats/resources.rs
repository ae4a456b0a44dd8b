//! Resource pools and ratio helpers.

/// Enum representing individual resource types.
///
/// Used in resource costs and error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    /// Health points.
    Health,
    /// Magic points.
    Mana,
}

/// Returns true when `current / maximum` is strictly below `percent` / 100.
///
/// Computed as `current * 100 < maximum * percent` in 64-bit integers, so the
/// boundary is exact: 30 of 100 is not below 30%. A non-positive `maximum`
/// never reports below.
pub fn below_percent(current: i32, maximum: i32, percent: i64) -> bool {
    if maximum <= 0 {
        return false;
    }
    i64::from(current) * 100 < i64::from(maximum) * percent
}

/// `value * numerator / denominator` computed in 64 bits and saturated back
/// into `i32`. Division truncates, which is the floor for non-negative input.
pub fn scale(value: i32, numerator: i64, denominator: i64) -> i32 {
    let scaled = i64::from(value) * numerator / denominator;
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
