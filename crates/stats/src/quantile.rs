//! Sample quantiles.

use serde::{Deserialize, Serialize};

/// Rank-interpolation rule for sample quantiles (Hyndman & Fan numbering).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileMethod {
    /// `h = (n - 1) p`: R's and numpy's default.
    #[default]
    Type7,
    /// `h = (n + 1) p`: Weibull plotting positions, used by the IHA software.
    Type6,
}

/// Quantile of pre-sorted data under `method`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile(sorted: &[f64], p: f64, method: QuantileMethod) -> f64 {
    match method {
        QuantileMethod::Type7 => quantile_type7(sorted, p),
        QuantileMethod::Type6 => quantile_type6(sorted, p),
    }
}

/// R's default quantile algorithm (type=7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Hyndman & Fan type 6 quantile, clamped to the sample range.
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type6(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type6: input must not be empty"
    );
    let n = sorted.len();
    // zero-based position
    let h = (n + 1) as f64 * p - 1.0;
    if h <= 0.0 {
        return sorted[0];
    }
    if h >= (n - 1) as f64 {
        return sorted[n - 1];
    }
    let lo = h.floor() as usize;
    sorted[lo] + (h - h.floor()) * (sorted[lo + 1] - sorted[lo])
}
