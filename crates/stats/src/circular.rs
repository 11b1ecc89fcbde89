//! Circular statistics for day-of-year values.
//!
//! A value `v` on a cycle of length `period` maps to the angle
//! `2π v / period`. Means are taken over unit vectors and mapped back with
//! `atan2`, so 350 and 10 average to the turn of the year rather than to
//! mid-summer.

use std::f64::consts::TAU;

fn mean_components(values: &[f64], period: f64) -> (f64, f64) {
    let n = values.len() as f64;
    let (s, c) = values.iter().fold((0.0, 0.0), |(s, c), &v| {
        let theta = TAU * v / period;
        (s + theta.sin(), c + theta.cos())
    });
    (s / n, c / n)
}

/// Circular mean of `values` on a cycle of length `period`, in `[0, period)`.
///
/// When the values cancel out exactly (no preferred direction) the result is
/// whatever `atan2(0, 0)` yields, i.e. 0.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn circular_mean(values: &[f64], period: f64) -> f64 {
    assert!(!values.is_empty(), "circular_mean: input must not be empty");
    let (s, c) = mean_components(values, period);
    let mut m = s.atan2(c) * period / TAU;
    if m < 0.0 {
        m += period;
    }
    if m >= period {
        m -= period;
    }
    m
}

/// Shorter-arc distance between two positions on a cycle of length `period`.
///
/// Always in `[0, period / 2]`.
pub fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let diff = (a - b).abs() % period;
    if diff > period / 2.0 {
        period - diff
    } else {
        diff
    }
}

/// Circular dispersion `1 - R`, where `R` is the mean resultant length.
///
/// 0 for identical values, approaching 1 for values spread evenly around
/// the cycle.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn circular_dispersion(values: &[f64], period: f64) -> f64 {
    assert!(
        !values.is_empty(),
        "circular_dispersion: input must not be empty"
    );
    let (s, c) = mean_components(values, period);
    1.0 - (s * s + c * c).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn mean_wraps_around_new_year() {
        let m = circular_mean(&[350.0, 10.0], 365.0);
        assert_relative_eq!(m, 362.5, epsilon = 1e-9);
        assert!(circular_distance(m, 0.0, 365.0) <= 2.5 + 1e-9);
    }

    #[test]
    fn mean_of_nearby_values_is_linear_mean() {
        let m = circular_mean(&[100.0, 110.0, 120.0], 365.25);
        assert_abs_diff_eq!(m, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn mean_of_single_value() {
        assert_abs_diff_eq!(circular_mean(&[42.0], 365.25), 42.0, epsilon = 1e-9);
    }

    #[test]
    fn distance_takes_shorter_arc() {
        assert_relative_eq!(circular_distance(350.0, 10.0, 365.0), 25.0, epsilon = 1e-12);
        assert_relative_eq!(circular_distance(10.0, 350.0, 365.0), 25.0, epsilon = 1e-12);
        assert_relative_eq!(circular_distance(100.0, 130.0, 365.0), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_is_bounded_by_half_period() {
        for a in (0..365).step_by(17) {
            for b in (0..365).step_by(23) {
                let d = circular_distance(a as f64, b as f64, 365.0);
                assert!((0.0..=182.5).contains(&d), "a={a} b={b} d={d}");
            }
        }
    }

    #[test]
    fn dispersion_identical_values() {
        assert_abs_diff_eq!(circular_dispersion(&[200.0; 5], 365.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn dispersion_opposite_values() {
        let d = circular_dispersion(&[0.0, 182.5], 365.0);
        assert_abs_diff_eq!(d, 1.0, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "circular_mean: input must not be empty")]
    fn mean_empty_panics() {
        circular_mean(&[], 365.0);
    }
}
