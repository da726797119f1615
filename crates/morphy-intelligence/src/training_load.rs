// ABOUTME: Athlete state estimation from activity history: ATL, CTL, TSB, ACWR, readiness and risk
// ABOUTME: Daily-resolution fold with exponentially decayed acute and chronic windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training load estimation
//!
//! Per-activity loads are bucketed per calendar day (UTC). Acute and chronic
//! loads are decayed sums over the last 7 and 42 days, each divided by its
//! window length:
//!
//! `load(window) = Σ_{i=0}^{window-1} daily(today - i) × e^(-i / window) / window`
//!
//! Activities dated after the anchor day are invisible to the estimate, which
//! is what lets the compliance fold reconstruct past days without look-ahead.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use morphy_core::constants::windows::{ACUTE_DAYS, CHRONIC_DAYS, NO_ACTIVITY_SENTINEL_DAYS};
use morphy_core::models::{ActivityRecord, AthleteProfile, HeartRateReference};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::trimp::activity_load;
use crate::physiological_constants::{acwr, readiness};

/// Injury-risk band derived from ACWR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryRisk {
    /// ACWR at or below 1.3
    Low,
    /// ACWR in (1.3, 1.5]
    Moderate,
    /// ACWR above 1.5
    High,
}

impl InjuryRisk {
    /// Classify a workload ratio with the standard bands
    #[must_use]
    pub fn from_acwr(ratio: f64) -> Self {
        if ratio > acwr::MODERATE_RISK_MAX {
            Self::High
        } else if ratio > acwr::LOW_RISK_MAX {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for InjuryRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived training state of an athlete on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteState {
    /// Day the state is anchored at
    pub as_of: NaiveDate,
    /// Acute training load (ATL)
    pub acute_load: f64,
    /// Chronic training load (CTL)
    pub chronic_load: f64,
    /// Training stress balance, CTL - ATL
    pub training_stress_balance: f64,
    /// Acute to chronic workload ratio, 0 when CTL is 0
    pub acwr: f64,
    /// Readiness score in `[0, 100]`
    pub readiness_score: f64,
    /// Injury-risk band
    pub injury_risk: InjuryRisk,
    /// Activities visible on the anchor day
    pub activity_count: usize,
    /// Whole days since the most recent visible activity
    pub days_since_last: Option<i64>,
    /// Heart-rate reference used for the loads
    pub heart_rate: HeartRateReference,
    /// Whether any visible activity carried heart-rate data
    pub has_heart_rate_data: bool,
}

impl AthleteState {
    /// Neutral state for an athlete with no visible activity
    #[must_use]
    pub const fn neutral(as_of: NaiveDate, heart_rate: HeartRateReference) -> Self {
        Self {
            as_of,
            acute_load: 0.0,
            chronic_load: 0.0,
            training_stress_balance: 0.0,
            acwr: 0.0,
            readiness_score: readiness::MAX_SCORE,
            injury_risk: InjuryRisk::Low,
            activity_count: 0,
            days_since_last: None,
            heart_rate,
            has_heart_rate_data: false,
        }
    }

    /// Days since the last activity, with the no-history sentinel
    #[must_use]
    pub fn days_since_last_or_sentinel(&self) -> i64 {
        self.days_since_last.unwrap_or(NO_ACTIVITY_SENTINEL_DAYS)
    }
}

/// Estimator configured with its acute and chronic window lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingLoadEstimator {
    acute_days: u32,
    chronic_days: u32,
}

impl Default for TrainingLoadEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingLoadEstimator {
    /// Standard 7/42-day windows
    #[must_use]
    pub const fn new() -> Self {
        Self {
            acute_days: ACUTE_DAYS,
            chronic_days: CHRONIC_DAYS,
        }
    }

    /// Custom windows; zero-length windows are widened to one day
    #[must_use]
    pub fn with_windows(acute_days: u32, chronic_days: u32) -> Self {
        Self {
            acute_days: acute_days.max(1),
            chronic_days: chronic_days.max(1),
        }
    }

    /// Estimate the state as of a given instant
    ///
    /// Activities are accepted in any order. Only activities whose UTC date is
    /// on or before the anchor date contribute.
    #[must_use]
    pub fn estimate(
        &self,
        activities: &[ActivityRecord],
        profile: &AthleteProfile,
        as_of: DateTime<Utc>,
    ) -> AthleteState {
        self.estimate_with_reference(activities, profile.resolve(), as_of.date_naive())
    }

    /// Estimate with an already resolved heart-rate reference
    #[must_use]
    pub fn estimate_with_reference(
        &self,
        activities: &[ActivityRecord],
        heart_rate: HeartRateReference,
        today: NaiveDate,
    ) -> AthleteState {
        let visible: Vec<&ActivityRecord> = activities
            .iter()
            .filter(|a| a.start_date().date_naive() <= today)
            .collect();

        let Some(last_day) = visible.iter().map(|a| a.start_date().date_naive()).max() else {
            return AthleteState::neutral(today, heart_rate);
        };

        let daily = daily_loads(&visible, &heart_rate);
        let acute_load = decayed_load(&daily, today, self.acute_days);
        let chronic_load = decayed_load(&daily, today, self.chronic_days);
        let training_stress_balance = chronic_load - acute_load;
        let ratio = workload_ratio(acute_load, chronic_load);
        let days_since_last = (today - last_day).num_days();

        let state = AthleteState {
            as_of: today,
            acute_load,
            chronic_load,
            training_stress_balance,
            acwr: ratio,
            readiness_score: readiness_score(training_stress_balance, ratio, Some(days_since_last)),
            injury_risk: InjuryRisk::from_acwr(ratio),
            activity_count: visible.len(),
            days_since_last: Some(days_since_last),
            heart_rate,
            has_heart_rate_data: visible.iter().any(|a| a.usable_heart_rate().is_some()),
        };

        debug!(
            as_of = %today,
            atl = state.acute_load,
            ctl = state.chronic_load,
            tsb = state.training_stress_balance,
            acwr = state.acwr,
            readiness = state.readiness_score,
            "estimated athlete state"
        );
        state
    }
}

/// Estimate the state as of now with the standard windows
#[must_use]
pub fn estimate_state(activities: &[ActivityRecord], profile: &AthleteProfile) -> AthleteState {
    estimate_state_at(activities, profile, Utc::now())
}

/// Estimate the state as of a given instant with the standard windows
#[must_use]
pub fn estimate_state_at(
    activities: &[ActivityRecord],
    profile: &AthleteProfile,
    as_of: DateTime<Utc>,
) -> AthleteState {
    TrainingLoadEstimator::new().estimate(activities, profile, as_of)
}

/// Total load per UTC calendar day
#[must_use]
pub fn daily_loads(
    activities: &[&ActivityRecord],
    reference: &HeartRateReference,
) -> BTreeMap<NaiveDate, f64> {
    let mut daily = BTreeMap::new();
    for activity in activities {
        *daily.entry(activity.start_date().date_naive()).or_insert(0.0) +=
            activity_load(activity, reference);
    }
    daily
}

/// Exponentially decayed load over a window ending on `today`
#[must_use]
pub fn decayed_load(daily: &BTreeMap<NaiveDate, f64>, today: NaiveDate, window_days: u32) -> f64 {
    let window = f64::from(window_days.max(1));
    let total: f64 = (0..window_days)
        .filter_map(|days_ago| {
            let day = today - Duration::days(i64::from(days_ago));
            daily
                .get(&day)
                .map(|load| load * (-f64::from(days_ago) / window).exp())
        })
        .sum();
    total / window
}

/// ACWR, defined as 0 when chronic load is 0
#[must_use]
pub fn workload_ratio(acute_load: f64, chronic_load: f64) -> f64 {
    if chronic_load > 0.0 {
        (acute_load / chronic_load).max(0.0)
    } else {
        0.0
    }
}

/// Composite readiness score clamped to `[0, 100]`
#[must_use]
pub fn readiness_score(tsb: f64, ratio: f64, days_since_last: Option<i64>) -> f64 {
    let mut score = readiness::BASE_SCORE;

    score += if tsb > 0.0 {
        (tsb * readiness::FRESH_TSB_WEIGHT).min(readiness::FRESH_TSB_CAP)
    } else {
        (tsb * readiness::FATIGUE_TSB_WEIGHT).max(readiness::FATIGUE_TSB_CAP)
    };

    if (acwr::SWEET_SPOT_MIN..=acwr::SWEET_SPOT_MAX).contains(&ratio) {
        score += readiness::SWEET_SPOT_BONUS;
    } else if ratio > acwr::MODERATE_RISK_MAX {
        score += readiness::HIGH_ACWR_PENALTY;
    } else if ratio < acwr::DETRAINING_MAX {
        score += readiness::DETRAINING_PENALTY;
    }

    score += match days_since_last {
        Some(1) => readiness::ONE_REST_DAY_BONUS,
        Some(2) => readiness::TWO_REST_DAYS_BONUS,
        Some(days) if days >= readiness::LONG_BREAK_DAYS => readiness::LONG_BREAK_PENALTY,
        _ => 0.0,
    };

    score.clamp(readiness::MIN_SCORE, readiness::MAX_SCORE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_components() {
        // fresh, sweet spot, one day off: 50 + 20 + 15 + 5
        assert!((readiness_score(10.0, 1.0, Some(1)) - 90.0).abs() < 1e-9);
        // fatigue is capped at -25, high ACWR -15, long break -5
        assert!((readiness_score(-40.0, 1.6, Some(5)) - 5.0).abs() < 1e-9);
        // detraining penalty
        assert!((readiness_score(0.0, 0.3, Some(0)) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_readiness_is_clamped() {
        assert!((readiness_score(1e9, 1.0, Some(2)) - 100.0).abs() < 1e-9);
        assert!(readiness_score(-1e9, 9.0, Some(30)) >= 0.0);
    }

    #[test]
    fn test_decayed_load_weights_by_age() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut daily = BTreeMap::new();
        daily.insert(today, 70.0);
        daily.insert(today - Duration::days(7), 70.0);
        // the 7-day-old entry falls outside the acute window
        assert!((decayed_load(&daily, today, 7) - 10.0).abs() < 1e-9);
        let chronic = decayed_load(&daily, today, 42);
        let expected = 70.0f64.mul_add((-7.0f64 / 42.0).exp(), 70.0) / 42.0;
        assert!((chronic - expected).abs() < 1e-9);
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(InjuryRisk::from_acwr(0.4), InjuryRisk::Low);
        assert_eq!(InjuryRisk::from_acwr(1.3), InjuryRisk::Low);
        assert_eq!(InjuryRisk::from_acwr(1.4), InjuryRisk::Moderate);
        assert_eq!(InjuryRisk::from_acwr(1.5), InjuryRisk::Moderate);
        assert_eq!(InjuryRisk::from_acwr(1.51), InjuryRisk::High);
    }
}
