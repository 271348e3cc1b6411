// =============================================================================
// Series helpers shared by the indicators and the snapshot builders
// =============================================================================

/// A series of `len` NaN values (all observations undefined).
pub fn undefined(len: usize) -> Vec<f64> {
    vec![f64::NAN; len]
}

/// Return the most recent defined (finite) value of `values`.
pub fn latest_defined(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| v.is_finite())
}

/// Copy the trailing `count` values of `values` (all of them when shorter).
pub fn last_n(values: &[f64], count: usize) -> Vec<f64> {
    let start = values.len().saturating_sub(count);
    values[start..].to_vec()
}

/// Element-wise `a - b`, NaN wherever either operand is undefined.
///
/// Both slices must have the same length; the shorter length wins otherwise.
pub(crate) fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            if x.is_finite() && y.is_finite() {
                x - y
            } else {
                f64::NAN
            }
        })
        .collect()
}
