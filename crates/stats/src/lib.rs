//! Statistical helper functions shared by the eflow parameter extractor and
//! the two alteration scorers.
//!
//! Everything here is a pure function over slices. Functions documented as
//! expecting sorted input do not sort for you.

mod circular;
mod quantile;
mod window;

pub use circular::{circular_dispersion, circular_distance, circular_mean};
pub use quantile::{QuantileMethod, quantile, quantile_type6, quantile_type7};
pub use window::{rolling_mean, run_lengths};

/// Below this magnitude a mean or CV is treated as zero.
pub const NEAR_ZERO: f64 = 1e-10;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator (matching R's `var()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n as f64 - 1.0)
}

/// Sample standard deviation with N-1 denominator (matching R's `sd()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population standard deviation (N denominator, numpy's `ddof=0`).
/// Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    (data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64).sqrt()
}

/// Coefficient of variation in percent: population SD / |mean| * 100.
///
/// Returns 0.0 when |mean| is below [`NEAR_ZERO`].
pub fn coefficient_of_variation(data: &[f64]) -> f64 {
    let m = mean(data);
    if m.abs() < NEAR_ZERO {
        return 0.0;
    }
    population_sd(data) / m.abs() * 100.0
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Sorts a copy of `data` ascending. NaNs compare equal to everything, so
/// callers should filter them first.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Copies the finite values of `data`, dropping NaN and infinities.
pub fn finite(data: impl IntoIterator<Item = f64>) -> Vec<f64> {
    data.into_iter().filter(|v| v.is_finite()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_population_sd() {
        // Classic textbook example: population sd = 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_sd(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_two() {
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_variance_single() {
        assert_eq!(variance(&[5.0]), 0.0);
    }

    #[test]
    fn test_cv() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(coefficient_of_variation(&data), 40.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cv_constant_is_zero() {
        assert_eq!(coefficient_of_variation(&[3.0; 10]), 0.0);
    }

    #[test]
    fn test_cv_zero_mean_is_zero() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "median: input must not be empty")]
    fn test_median_empty_panics() {
        median(&[]);
    }

    #[test]
    fn test_sorted_and_finite() {
        let v = finite([3.0, f64::NAN, 1.0, f64::INFINITY, 2.0]);
        assert_eq!(sorted(&v), vec![1.0, 2.0, 3.0]);
    }
}
