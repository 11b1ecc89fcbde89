//! Per-year reducers for the five IHA groups.
//!
//! Each function reads one complete year's slice and returns that group's
//! fixed-width block of parameters.

use eflow_stats::{mean, rolling_mean, run_lengths};

use crate::config::{CentralTendency, FallRateSign};
use crate::thresholds::PulseThresholds;

/// Rolling-window lengths for the group 2 extremes, in column order.
pub const WINDOWS: [usize; 5] = [1, 3, 7, 30, 90];

/// Annual means at or below this are treated as zero for the baseflow index.
const BFI_MIN_MEAN: f64 = 1e-15;

/// Group 1: mean flow of each calendar month (January first).
///
/// `months` holds the calendar month (1..=12) of every day. A month with no
/// days in the slice is NaN.
pub fn monthly_means(flows: &[f64], months: &[u32]) -> [f64; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];
    for (&q, &m) in flows.iter().zip(months) {
        let i = (m as usize).wrapping_sub(1);
        if i < 12 {
            sums[i] += q;
            counts[i] += 1;
        }
    }
    std::array::from_fn(|i| {
        if counts[i] > 0 {
            sums[i] / counts[i] as f64
        } else {
            f64::NAN
        }
    })
}

/// Group 2: rolling-mean minima and maxima, zero-flow days, baseflow index.
///
/// Layout: min over [`WINDOWS`] (5), max over [`WINDOWS`] (5), count of days
/// with flow below `zero_flow_threshold`, then min 7-day mean / annual mean.
/// Windows never reach outside the slice, so a slice shorter than a window
/// gives NaN for that window's extremes.
pub fn extremes(flows: &[f64], zero_flow_threshold: f64) -> [f64; 12] {
    let mut out = [f64::NAN; 12];
    for (i, &w) in WINDOWS.iter().enumerate() {
        let rm = rolling_mean(flows, w);
        if rm.is_empty() {
            continue;
        }
        out[i] = rm.iter().copied().fold(f64::INFINITY, f64::min);
        out[i + 5] = rm.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    }

    out[10] = flows.iter().filter(|&&q| q < zero_flow_threshold).count() as f64;

    let annual_mean = mean(flows);
    out[11] = if annual_mean > BFI_MIN_MEAN {
        out[2] / annual_mean
    } else {
        f64::NAN
    };
    out
}

/// Group 3: day of year of the annual minimum and maximum.
///
/// Ties go to the earliest day.
pub fn timing(flows: &[f64], day_of_year: &[u32]) -> [f64; 2] {
    if flows.is_empty() {
        return [f64::NAN; 2];
    }
    let mut i_min = 0;
    let mut i_max = 0;
    for (i, &q) in flows.iter().enumerate() {
        if q < flows[i_min] {
            i_min = i;
        }
        if q > flows[i_max] {
            i_max = i;
        }
    }
    [day_of_year[i_min] as f64, day_of_year[i_max] as f64]
}

/// Group 4: low pulse count and duration, high pulse count and duration.
///
/// A low pulse is a maximal run of days with flow strictly below
/// `thresholds.low()`; a high pulse one strictly above `thresholds.high()`.
/// The duration is 0.0 when there are no pulses.
pub fn pulses(flows: &[f64], thresholds: &PulseThresholds, statistic: CentralTendency) -> [f64; 4] {
    let low_mask: Vec<bool> = flows.iter().map(|&q| q < thresholds.low()).collect();
    let high_mask: Vec<bool> = flows.iter().map(|&q| q > thresholds.high()).collect();
    let low = durations(&low_mask);
    let high = durations(&high_mask);
    [
        low.len() as f64,
        statistic.apply(&low),
        high.len() as f64,
        statistic.apply(&high),
    ]
}

fn durations(mask: &[bool]) -> Vec<f64> {
    run_lengths(mask).into_iter().map(|n| n as f64).collect()
}

/// Group 5: rise rate, fall rate and number of reversals.
///
/// Day-to-day differences are taken inside the slice only. Rises are
/// strictly positive differences, falls strictly negative; either statistic
/// is 0.0 when the year has none. A reversal is a change of sign between
/// consecutive nonzero differences; zero differences are skipped.
pub fn rate_of_change(
    flows: &[f64],
    statistic: CentralTendency,
    fall_sign: FallRateSign,
) -> [f64; 3] {
    let mut rises = Vec::new();
    let mut falls = Vec::new();
    let mut reversals = 0usize;
    let mut last_rising: Option<bool> = None;

    for pair in flows.windows(2) {
        let dq = pair[1] - pair[0];
        let rising = if dq > 0.0 {
            rises.push(dq);
            true
        } else if dq < 0.0 {
            falls.push(dq);
            false
        } else {
            continue;
        };
        if last_rising.is_some_and(|prev| prev != rising) {
            reversals += 1;
        }
        last_rising = Some(rising);
    }

    let fall = statistic.apply(&falls);
    let fall = match fall_sign {
        FallRateSign::Signed => fall,
        FallRateSign::Magnitude => fall.abs(),
    };
    [statistic.apply(&rises), fall, reversals as f64]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn monthly_means_missing_month_is_nan() {
        let flows = [1.0, 3.0, 10.0];
        let months = [1, 1, 3];
        let m = monthly_means(&flows, &months);
        assert_relative_eq!(m[0], 2.0, epsilon = 1e-12);
        assert!(m[1].is_nan());
        assert_relative_eq!(m[2], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn extremes_one_day_window_is_plain_extremes() {
        let flows: Vec<f64> = (0..365).map(|i| 5.0 + (i as f64 * 0.1).sin()).collect();
        let e = extremes(&flows, 0.001);
        let min = flows.iter().copied().fold(f64::INFINITY, f64::min);
        let max = flows.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(e[0], min);
        assert_eq!(e[5], max);
    }

    #[test]
    fn extremes_windows_nest() {
        let flows: Vec<f64> = (0..365).map(|i| 10.0 + 3.0 * (i as f64 / 20.0).cos()).collect();
        let e = extremes(&flows, 0.001);
        for k in 0..4 {
            assert!(e[k] <= e[k + 1] + 1e-12, "min window {k}");
            assert!(e[5 + k] >= e[5 + k + 1] - 1e-12, "max window {k}");
        }
    }

    #[test]
    fn extremes_short_slice_gives_nan_for_long_windows() {
        let flows = vec![2.0; 10];
        let e = extremes(&flows, 0.001);
        assert_eq!(e[2], 2.0);
        assert!(e[3].is_nan());
        assert!(e[4].is_nan());
        assert!(e[8].is_nan());
        assert!(e[9].is_nan());
    }

    #[test]
    fn zero_flow_days_and_bfi() {
        let mut flows = vec![4.0; 365];
        flows[0] = 0.0;
        flows[1] = 0.0005;
        let e = extremes(&flows, 0.001);
        assert_eq!(e[10], 2.0);
        assert!(e[11] > 0.0 && e[11] < 1.0);
    }

    #[test]
    fn bfi_nan_for_zero_year() {
        let e = extremes(&[0.0; 365], 0.001);
        assert!(e[11].is_nan());
        assert_eq!(e[10], 365.0);
    }

    #[test]
    fn timing_first_occurrence() {
        let flows = [3.0, 1.0, 5.0, 1.0, 5.0];
        let doy = [10, 11, 12, 13, 14];
        assert_eq!(timing(&flows, &doy), [11.0, 12.0]);
    }

    #[test]
    fn pulses_counts_and_durations() {
        let t = PulseThresholds::new(2.0, 8.0).unwrap();
        // low runs: [0,1] len 2, [5] len 1; high runs: [3] len 1, [7,8,9] len 3
        let flows = [1.0, 1.5, 5.0, 9.0, 5.0, 0.5, 5.0, 10.0, 10.0, 10.0];
        let p = pulses(&flows, &t, CentralTendency::Mean);
        assert_eq!(p, [2.0, 1.5, 2.0, 2.0]);
        let p = pulses(&flows, &t, CentralTendency::Median);
        assert_eq!(p, [2.0, 1.5, 2.0, 2.0]);
    }

    #[test]
    fn pulses_at_threshold_do_not_count() {
        let t = PulseThresholds::new(2.0, 8.0).unwrap();
        let p = pulses(&[2.0, 8.0, 2.0, 8.0], &t, CentralTendency::Mean);
        assert_eq!(p, [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rate_of_change_signed_and_magnitude() {
        let flows = [1.0, 3.0, 2.0, 2.0, 6.0, 5.0];
        // diffs: +2, -1, 0, +4, -1
        let r = rate_of_change(&flows, CentralTendency::Median, FallRateSign::Signed);
        assert_eq!(r, [3.0, -1.0, 3.0]);
        let r = rate_of_change(&flows, CentralTendency::Mean, FallRateSign::Magnitude);
        assert_eq!(r, [3.0, 1.0, 3.0]);
    }

    #[test]
    fn flat_days_do_not_reset_baseline() {
        // +1, 0, 0, +1, 0, -1: one reversal
        let flows = [1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 2.0];
        let r = rate_of_change(&flows, CentralTendency::Median, FallRateSign::Signed);
        assert_eq!(r[2], 1.0);
    }

    #[test]
    fn monotone_series_has_no_falls() {
        let flows: Vec<f64> = (0..50).map(f64::from).collect();
        let r = rate_of_change(&flows, CentralTendency::Median, FallRateSign::Signed);
        assert_eq!(r, [1.0, 0.0, 0.0]);
    }
}
