// ABOUTME: Effective decision thresholds derived from base constants and personal multipliers
// ABOUTME: Explicit struct with named fields replacing loosely-typed threshold overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Decision thresholds
//!
//! Base values come from the ACWR and TSB literature. A [`ThresholdProfile`]
//! scales each base value by its learned multiplier; without a profile every
//! multiplier is 1.0.

use morphy_core::models::{ThresholdKind, ThresholdProfile};
use serde::{Deserialize, Serialize};

/// ACWR above which injury risk is treated as high
pub const BASE_ACWR_DANGER: f64 = 1.5;
/// ACWR above which load is treated as elevated
pub const BASE_ACWR_CAUTION: f64 = 1.3;
/// TSB below which fatigue has accumulated
pub const BASE_TSB_FATIGUED: f64 = -15.0;
/// TSB above which the athlete is fresh enough for quality work
pub const BASE_TSB_FRESH: f64 = 10.0;
/// Readiness below which a balanced day is shortened
pub const BASE_READINESS_LOW: f64 = 40.0;

/// Thresholds the decision engine compares the athlete state against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// ACWR danger threshold
    pub acwr_danger: f64,
    /// ACWR caution threshold
    pub acwr_caution: f64,
    /// TSB fatigue threshold (negative)
    pub tsb_fatigued: f64,
    /// TSB freshness threshold
    pub tsb_fresh: f64,
    /// Readiness low threshold
    pub readiness_low: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            acwr_danger: BASE_ACWR_DANGER,
            acwr_caution: BASE_ACWR_CAUTION,
            tsb_fatigued: BASE_TSB_FATIGUED,
            tsb_fresh: BASE_TSB_FRESH,
            readiness_low: BASE_READINESS_LOW,
        }
    }
}

impl DecisionThresholds {
    /// Base thresholds scaled by a personal profile
    #[must_use]
    pub fn from_profile(profile: &ThresholdProfile) -> Self {
        Self {
            acwr_danger: BASE_ACWR_DANGER * profile.multiplier(ThresholdKind::AcwrDanger),
            acwr_caution: BASE_ACWR_CAUTION * profile.multiplier(ThresholdKind::AcwrCaution),
            tsb_fatigued: BASE_TSB_FATIGUED * profile.multiplier(ThresholdKind::TsbRest),
            tsb_fresh: BASE_TSB_FRESH * profile.multiplier(ThresholdKind::TsbReduce),
            readiness_low: BASE_READINESS_LOW * profile.multiplier(ThresholdKind::ReadinessLow),
        }
    }

    /// Thresholds for an optional profile
    #[must_use]
    pub fn resolve(profile: Option<&ThresholdProfile>) -> Self {
        profile.map_or_else(Self::default, Self::from_profile)
    }

    /// Effective value for one threshold kind
    #[must_use]
    pub const fn value(&self, kind: ThresholdKind) -> f64 {
        match kind {
            ThresholdKind::AcwrDanger => self.acwr_danger,
            ThresholdKind::AcwrCaution => self.acwr_caution,
            ThresholdKind::TsbRest => self.tsb_fatigued,
            ThresholdKind::TsbReduce => self.tsb_fresh,
            ThresholdKind::ReadinessLow => self.readiness_low,
        }
    }
}
