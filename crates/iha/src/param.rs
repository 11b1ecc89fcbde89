//! Symbolic names for the 33 parameter columns and their five groups.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Number of IHA parameters per year.
pub const N_PARAMS: usize = 33;

/// Number of IHA groups.
pub const N_GROUPS: usize = 5;

static PARAMS: [Param; N_PARAMS] = Param::ALL;

/// One of the 33 per-year parameters, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
    #[serde(rename = "min_1day")]
    Min1Day,
    #[serde(rename = "min_3day")]
    Min3Day,
    #[serde(rename = "min_7day")]
    Min7Day,
    #[serde(rename = "min_30day")]
    Min30Day,
    #[serde(rename = "min_90day")]
    Min90Day,
    #[serde(rename = "max_1day")]
    Max1Day,
    #[serde(rename = "max_3day")]
    Max3Day,
    #[serde(rename = "max_7day")]
    Max7Day,
    #[serde(rename = "max_30day")]
    Max30Day,
    #[serde(rename = "max_90day")]
    Max90Day,
    ZeroFlowDays,
    BaseFlowIndex,
    DateOfMin,
    DateOfMax,
    LowPulseCount,
    LowPulseDuration,
    HighPulseCount,
    HighPulseDuration,
    RiseRate,
    FallRate,
    Reversals,
}

impl Param {
    /// All parameters in column order.
    pub const ALL: [Param; N_PARAMS] = [
        Param::Jan,
        Param::Feb,
        Param::Mar,
        Param::Apr,
        Param::May,
        Param::Jun,
        Param::Jul,
        Param::Aug,
        Param::Sep,
        Param::Oct,
        Param::Nov,
        Param::Dec,
        Param::Min1Day,
        Param::Min3Day,
        Param::Min7Day,
        Param::Min30Day,
        Param::Min90Day,
        Param::Max1Day,
        Param::Max3Day,
        Param::Max7Day,
        Param::Max30Day,
        Param::Max90Day,
        Param::ZeroFlowDays,
        Param::BaseFlowIndex,
        Param::DateOfMin,
        Param::DateOfMax,
        Param::LowPulseCount,
        Param::LowPulseDuration,
        Param::HighPulseCount,
        Param::HighPulseDuration,
        Param::RiseRate,
        Param::FallRate,
        Param::Reversals,
    ];

    /// Column names, matching [`Param::ALL`].
    pub const NAMES: [&'static str; N_PARAMS] = [
        "jan",
        "feb",
        "mar",
        "apr",
        "may",
        "jun",
        "jul",
        "aug",
        "sep",
        "oct",
        "nov",
        "dec",
        "min_1day",
        "min_3day",
        "min_7day",
        "min_30day",
        "min_90day",
        "max_1day",
        "max_3day",
        "max_7day",
        "max_30day",
        "max_90day",
        "zero_flow_days",
        "base_flow_index",
        "date_of_min",
        "date_of_max",
        "low_pulse_count",
        "low_pulse_duration",
        "high_pulse_count",
        "high_pulse_duration",
        "rise_rate",
        "fall_rate",
        "reversals",
    ];

    /// Column index of this parameter.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name of this parameter.
    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Group this parameter belongs to.
    pub fn group(self) -> Group {
        let i = self.index();
        Group::ALL
            .into_iter()
            .find(|g| g.columns().contains(&i))
            .unwrap_or(Group::RateOfChange)
    }

    /// Parameter at column `index`, if any.
    pub fn from_index(index: usize) -> Option<Param> {
        Self::ALL.get(index).copied()
    }

    /// Parameter with column name `name`, if any.
    pub fn from_name(name: &str) -> Option<Param> {
        Self::NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self::ALL[i])
    }

    /// Day-of-year parameters, compared with circular statistics.
    pub fn is_timing(self) -> bool {
        matches!(self, Param::DateOfMin | Param::DateOfMax)
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The five IHA groups, each a contiguous block of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Monthly mean flows (12).
    Monthly,
    /// Annual extremes, zero-flow days and baseflow index (12).
    Extremes,
    /// Day of year of the annual extremes (2).
    Timing,
    /// Low and high pulse counts and durations (4).
    Pulses,
    /// Rise rate, fall rate and reversals (3).
    RateOfChange,
}

impl Group {
    /// All groups in column order.
    pub const ALL: [Group; N_GROUPS] = [
        Group::Monthly,
        Group::Extremes,
        Group::Timing,
        Group::Pulses,
        Group::RateOfChange,
    ];

    /// Column range of this group.
    pub fn columns(self) -> Range<usize> {
        match self {
            Group::Monthly => 0..12,
            Group::Extremes => 12..24,
            Group::Timing => 24..26,
            Group::Pulses => 26..30,
            Group::RateOfChange => 30..33,
        }
    }

    /// Number of columns in this group.
    pub fn len(self) -> usize {
        self.columns().len()
    }

    /// 1-based group number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Group with 1-based number `n`, if any.
    pub fn from_number(n: u8) -> Option<Group> {
        (n as usize)
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Parameters of this group in column order.
    pub fn params(self) -> &'static [Param] {
        &PARAMS[self.columns()]
    }
}
