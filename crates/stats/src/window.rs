//! Moving-window and run-length helpers.

/// Rolling mean over complete windows of length `window`.
///
/// Element `j` is the mean of `data[j..j + window]`, i.e. the window ending at
/// position `j + window - 1`. Positions whose window would reach before the
/// start of `data` are not produced, so the result has
/// `data.len() - window + 1` elements, or none when `data` is shorter than
/// the window.
///
/// # Panics
///
/// Panics if `window` is zero.
pub fn rolling_mean(data: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "rolling_mean: window must be positive");
    if window == 1 {
        return data.to_vec();
    }
    let k = window as f64;
    data.windows(window)
        .map(|w| w.iter().sum::<f64>() / k)
        .collect()
}

/// Lengths of the maximal runs of `true` in `mask`, in order of occurrence.
///
/// Runs touching the first or last element count like any other.
pub fn run_lengths(mask: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for &m in mask {
        if m {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}
