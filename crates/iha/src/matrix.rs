//! The year-indexed parameter matrix produced by extraction.

use ndarray::{Array2, ArrayView1, ArrayView2, s};

use crate::config::Conventions;
use crate::error::IhaError;
use crate::param::{Group, N_PARAMS, Param};
use crate::thresholds::{PulseThresholds, ThresholdSource};

/// Thirty-three parameters per complete year, plus the settings that
/// produced them.
///
/// Rows follow chronological year order. Instances are immutable; build one
/// with [`compute_iha`](crate::compute_iha) or [`ParameterMatrix::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMatrix {
    values: Array2<f64>,
    years: Vec<i32>,
    zero_flow_threshold: f64,
    pulse_thresholds: Option<(PulseThresholds, ThresholdSource)>,
    conventions: Conventions,
}

impl ParameterMatrix {
    /// Wraps a `(n_years, 33)` value array.
    ///
    /// # Errors
    ///
    /// Returns [`IhaError::MatrixShape`] if `values` does not have 33 columns
    /// or its row count differs from `years.len()`.
    pub fn new(
        values: Array2<f64>,
        years: Vec<i32>,
        zero_flow_threshold: f64,
        pulse_thresholds: Option<(PulseThresholds, ThresholdSource)>,
        conventions: Conventions,
    ) -> Result<Self, IhaError> {
        let (n_rows, n_cols) = values.dim();
        if n_cols != N_PARAMS || n_rows != years.len() {
            return Err(IhaError::MatrixShape {
                n_rows,
                n_cols,
                n_years: years.len(),
            });
        }
        Ok(Self {
            values,
            years,
            zero_flow_threshold,
            pulse_thresholds,
            conventions,
        })
    }

    /// The full `(n_years, 33)` array.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Year labels, one per row.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Number of complete years.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// Number of parameter columns.
    pub fn n_params(&self) -> usize {
        self.values.ncols()
    }

    /// Columns of one group, `(n_years, group.len())`.
    pub fn group(&self, group: Group) -> ArrayView2<'_, f64> {
        self.values.slice(s![.., group.columns()])
    }

    /// One parameter across all years.
    pub fn param(&self, param: Param) -> ArrayView1<'_, f64> {
        self.values.column(param.index())
    }

    /// All 33 parameters of `year`, or `None` if that year is absent.
    pub fn year_row(&self, year: i32) -> Option<ArrayView1<'_, f64>> {
        self.years
            .iter()
            .position(|&y| y == year)
            .map(|i| self.values.row(i))
    }

    /// Flow below which a day counted as zero flow.
    pub fn zero_flow_threshold(&self) -> f64 {
        self.zero_flow_threshold
    }

    /// Pulse thresholds used for group 4, if recorded.
    pub fn pulse_thresholds(&self) -> Option<PulseThresholds> {
        self.pulse_thresholds.map(|(t, _)| t)
    }

    /// How the recorded pulse thresholds were obtained.
    pub fn threshold_source(&self) -> Option<ThresholdSource> {
        self.pulse_thresholds.map(|(_, src)| src)
    }

    /// Conventions in force during extraction.
    pub fn conventions(&self) -> Conventions {
        self.conventions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(n_years: usize) -> ParameterMatrix {
        let values = Array2::from_shape_fn((n_years, N_PARAMS), |(r, c)| (r * 100 + c) as f64);
        let years = (0..n_years as i32).map(|i| 2000 + i).collect();
        ParameterMatrix::new(values, years, 0.001, None, Conventions::default()).unwrap()
    }

    #[test]
    fn rejects_wrong_width() {
        let err = ParameterMatrix::new(
            Array2::zeros((2, 32)),
            vec![2000, 2001],
            0.001,
            None,
            Conventions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            IhaError::MatrixShape {
                n_rows: 2,
                n_cols: 32,
                n_years: 2
            }
        );
    }

    #[test]
    fn rejects_year_count_mismatch() {
        assert!(
            ParameterMatrix::new(
                Array2::zeros((2, N_PARAMS)),
                vec![2000],
                0.001,
                None,
                Conventions::default(),
            )
            .is_err()
        );
    }

    #[test]
    fn group_and_param_views() {
        let m = matrix(3);
        let g3 = m.group(Group::Timing);
        assert_eq!(g3.dim(), (3, 2));
        assert_eq!(g3[[1, 0]], 124.0);
        assert_eq!(m.param(Param::Reversals)[2], 232.0);
        assert_eq!(m.n_params(), N_PARAMS);
    }

    #[test]
    fn year_row_lookup() {
        let m = matrix(3);
        let row = m.year_row(2001).unwrap();
        assert_eq!(row.len(), N_PARAMS);
        assert_eq!(row[0], 100.0);
        assert!(m.year_row(1999).is_none());
    }

    #[test]
    fn thresholds_metadata() {
        let t = PulseThresholds::new(1.0, 2.0).unwrap();
        let m = ParameterMatrix::new(
            Array2::zeros((1, N_PARAMS)),
            vec![2000],
            0.5,
            Some((t, ThresholdSource::Derived)),
            Conventions::default(),
        )
        .unwrap();
        assert_eq!(m.pulse_thresholds(), Some(t));
        assert_eq!(m.threshold_source(), Some(ThresholdSource::Derived));
        assert_eq!(m.zero_flow_threshold(), 0.5);
        assert!(matrix(1).pulse_thresholds().is_none());
    }
}
