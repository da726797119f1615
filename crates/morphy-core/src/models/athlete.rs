// ABOUTME: Athlete heart-rate profile and the resolved reference used by the algorithms
// ABOUTME: Falls back to population defaults and records whether values were measured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::heart_rate::{
    DEFAULT_MAX_HR, DEFAULT_REST_HR, MAX_PLAUSIBLE_HR, MIN_PLAUSIBLE_HR,
};

/// Heart-rate values an athlete may have recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Measured maximum heart rate (bpm)
    pub max_hr: Option<u32>,
    /// Measured resting heart rate (bpm)
    pub rest_hr: Option<u32>,
}

impl AthleteProfile {
    /// Profile with both values known
    #[must_use]
    pub const fn new(max_hr: u32, rest_hr: u32) -> Self {
        Self {
            max_hr: Some(max_hr),
            rest_hr: Some(rest_hr),
        }
    }

    /// Resolve against the built-in population defaults
    #[must_use]
    pub fn resolve(&self) -> HeartRateReference {
        self.resolve_with(DEFAULT_MAX_HR, DEFAULT_REST_HR)
    }

    /// Resolve against caller-provided defaults
    ///
    /// Missing or implausible values are replaced by the defaults. A profile
    /// whose maximum does not exceed its resting value cannot produce a heart
    /// rate reserve, so both values fall back together in that case.
    #[must_use]
    pub fn resolve_with(&self, default_max: u32, default_rest: u32) -> HeartRateReference {
        let max = self.max_hr.filter(|hr| is_plausible(*hr));
        let rest = self.rest_hr.filter(|hr| is_plausible(*hr));

        match (max, rest) {
            (Some(max_hr), Some(rest_hr)) if max_hr > rest_hr => HeartRateReference {
                max_hr,
                rest_hr,
                precision: HrPrecision::Measured,
            },
            (Some(max_hr), None) if max_hr > default_rest => HeartRateReference {
                max_hr,
                rest_hr: default_rest,
                precision: HrPrecision::PopulationDefault,
            },
            (None, Some(rest_hr)) if default_max > rest_hr => HeartRateReference {
                max_hr: default_max,
                rest_hr,
                precision: HrPrecision::PopulationDefault,
            },
            _ => HeartRateReference {
                max_hr: default_max,
                rest_hr: default_rest,
                precision: HrPrecision::PopulationDefault,
            },
        }
    }
}

const fn is_plausible(hr: u32) -> bool {
    hr >= MIN_PLAUSIBLE_HR && hr <= MAX_PLAUSIBLE_HR
}

/// Whether a heart-rate reference came from the athlete or from defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrPrecision {
    /// Both values were measured for this athlete
    Measured,
    /// At least one value is a population default
    PopulationDefault,
}

/// Resolved maximum and resting heart rate used for zone and load maths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateReference {
    /// Maximum heart rate (bpm)
    pub max_hr: u32,
    /// Resting heart rate (bpm)
    pub rest_hr: u32,
    /// Where the values came from
    pub precision: HrPrecision,
}

impl HeartRateReference {
    /// Heart rate reserve in bpm (always positive)
    #[must_use]
    pub const fn reserve(&self) -> u32 {
        self.max_hr.saturating_sub(self.rest_hr)
    }

    /// Fraction of heart rate reserve for an average heart rate, unclamped
    #[must_use]
    pub fn reserve_fraction(&self, average_hr: f64) -> f64 {
        let reserve = f64::from(self.reserve());
        if reserve <= 0.0 {
            return 0.0;
        }
        (average_hr - f64::from(self.rest_hr)) / reserve
    }

    /// Heart rate at a given fraction of reserve, rounded to whole bpm
    #[must_use]
    pub fn heart_rate_at(&self, fraction: f64) -> u32 {
        let bpm = fraction.mul_add(f64::from(self.reserve()), f64::from(self.rest_hr));
        bpm.round().max(0.0) as u32
    }

    /// Hint shown to athletes whose zones rely on defaults
    #[must_use]
    pub const fn precision_hint(&self) -> Option<&'static str> {
        match self.precision {
            HrPrecision::Measured => None,
            HrPrecision::PopulationDefault => Some(
                "Heart-rate zones use population defaults. Add your measured maximum and resting heart rate for personal zones.",
            ),
        }
    }
}
