// ABOUTME: Per-activity training impulse (TRIMP) with a heart-rate model and an estimated fallback
// ABOUTME: Banister heart-rate reserve weighting when HR exists, pace/type/elevation estimate otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use morphy_core::models::{ActivityKind, ActivityRecord, HeartRateReference};
use serde::{Deserialize, Serialize};

use crate::physiological_constants::{estimated_intensity, trimp};

/// How the load of a single activity is computed
///
/// - `HeartRateReserve`: Banister TRIMP from average heart rate
/// - `Estimated`: intensity from pace, weighted by activity type and climbing
///
/// # Scientific References
///
/// - Banister, E.W. (1991). "Modeling elite athletic performance." *Physiological Testing of Elite Athletes*.
/// - Foster, C. et al. (2001). "A new approach to monitoring exercise training." *J Strength Cond Res*, 15(1), 109-115.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadModel {
    /// Banister formula
    ///
    /// Formula: `duration_minutes × hrr × 0.64 × exp(1.92 × hrr)`
    ///
    /// Where `hrr = clamp((avg_hr - rest_hr) / (max_hr - rest_hr), 0, 1)`
    HeartRateReserve,

    /// Estimate for activities without heart-rate data
    ///
    /// Formula: `duration_minutes × intensity × type_factor × elevation_factor`
    Estimated,
}

impl LoadModel {
    /// Pick the model an activity supports
    #[must_use]
    pub fn for_activity(activity: &ActivityRecord) -> Self {
        if activity.usable_heart_rate().is_some() {
            Self::HeartRateReserve
        } else {
            Self::Estimated
        }
    }

    /// Model name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HeartRateReserve => "heart_rate_reserve",
            Self::Estimated => "estimated",
        }
    }

    /// Formula description
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::HeartRateReserve => "duration × HRR × 0.64 × e^(1.92 × HRR)",
            Self::Estimated => "duration × intensity × type_factor × elevation_factor",
        }
    }

    /// Load of one activity under this model
    ///
    /// Falls back to the estimate when the heart-rate model is requested for an
    /// activity without heart-rate data.
    #[must_use]
    pub fn calculate(&self, activity: &ActivityRecord, reference: &HeartRateReference) -> f64 {
        match (self, activity.usable_heart_rate()) {
            (Self::HeartRateReserve, Some(avg_hr)) => {
                banister_trimp(activity.duration_minutes(), avg_hr, reference)
            }
            _ => estimated_load(activity),
        }
    }
}

/// Load of one activity using the best model its data supports
#[must_use]
pub fn activity_load(activity: &ActivityRecord, reference: &HeartRateReference) -> f64 {
    LoadModel::for_activity(activity).calculate(activity, reference)
}

/// Heart rate reserve fraction clamped to `[0, 1]`
#[must_use]
pub fn hrr_fraction(avg_hr: f64, reference: &HeartRateReference) -> f64 {
    reference.reserve_fraction(avg_hr).clamp(0.0, 1.0)
}

/// Banister TRIMP for a session
#[must_use]
pub fn banister_trimp(duration_minutes: f64, avg_hr: f64, reference: &HeartRateReference) -> f64 {
    let hrr = hrr_fraction(avg_hr, reference);
    duration_minutes * hrr * trimp::BASE_MULTIPLIER * (trimp::EXPONENTIAL_FACTOR * hrr).exp()
}

/// Load estimate for sessions without heart-rate data
#[must_use]
pub fn estimated_load(activity: &ActivityRecord) -> f64 {
    activity.duration_minutes()
        * pace_intensity(activity.pace_min_per_km())
        * type_factor(activity.kind())
        * elevation_factor(activity.elevation_gain_m())
}

/// Intensity bucket for a pace in minutes per kilometre
#[must_use]
pub fn pace_intensity(pace_min_per_km: Option<f64>) -> f64 {
    use estimated_intensity::{
        EASY_INTENSITY, HARD_INTENSITY, HARD_PACE_MIN_PER_KM, MODERATE_INTENSITY,
        MODERATE_PACE_MIN_PER_KM, STEADY_INTENSITY, STEADY_PACE_MIN_PER_KM,
    };

    match pace_min_per_km {
        Some(pace) if pace < HARD_PACE_MIN_PER_KM => HARD_INTENSITY,
        Some(pace) if pace < MODERATE_PACE_MIN_PER_KM => MODERATE_INTENSITY,
        Some(pace) if pace < STEADY_PACE_MIN_PER_KM => STEADY_INTENSITY,
        Some(_) => EASY_INTENSITY,
        None => STEADY_INTENSITY,
    }
}

/// Load weighting for an activity kind
#[must_use]
pub const fn type_factor(kind: ActivityKind) -> f64 {
    match kind {
        ActivityKind::Run => estimated_intensity::RUN_FACTOR,
        ActivityKind::Swim => estimated_intensity::SWIM_FACTOR,
        ActivityKind::Ride => estimated_intensity::RIDE_FACTOR,
        ActivityKind::WeightTraining => estimated_intensity::WEIGHT_TRAINING_FACTOR,
        ActivityKind::Hike => estimated_intensity::HIKE_FACTOR,
        ActivityKind::Walk => estimated_intensity::WALK_FACTOR,
        ActivityKind::Other => estimated_intensity::DEFAULT_FACTOR,
    }
}

/// Climbing bonus for an elevation gain in metres
#[must_use]
pub fn elevation_factor(elevation_gain_m: f64) -> f64 {
    if elevation_gain_m > estimated_intensity::HIGH_ELEVATION_M {
        estimated_intensity::HIGH_ELEVATION_BONUS
    } else if elevation_gain_m > estimated_intensity::MODERATE_ELEVATION_M {
        estimated_intensity::MODERATE_ELEVATION_BONUS
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use morphy_core::models::{ActivityRecordBuilder, AthleteProfile};

    fn reference() -> HeartRateReference {
        AthleteProfile::new(190, 60).resolve()
    }

    #[test]
    fn test_banister_reference_session() {
        let load = banister_trimp(45.0, 160.0, &reference());
        assert!((load - 97.01).abs() < 0.1, "got {load}");
    }

    #[test]
    fn test_hrr_is_clamped() {
        assert!(hrr_fraction(40.0, &reference()).abs() < f64::EPSILON);
        assert!((hrr_fraction(220.0, &reference()) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_elevation_steps_apply_largest_first() {
        assert!((elevation_factor(50.0) - 1.0).abs() < f64::EPSILON);
        assert!((elevation_factor(150.0) - 1.15).abs() < f64::EPSILON);
        assert!((elevation_factor(450.0) - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pace_buckets() {
        assert!((pace_intensity(Some(4.0)) - 0.9).abs() < f64::EPSILON);
        assert!((pace_intensity(Some(5.0)) - 0.75).abs() < f64::EPSILON);
        assert!((pace_intensity(Some(6.0)) - 0.6).abs() < f64::EPSILON);
        assert!((pace_intensity(Some(8.0)) - 0.45).abs() < f64::EPSILON);
        assert!((pace_intensity(None) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimated_load_for_hilly_ride() {
        // 3.33 m/s over 40 km is 5.0 min/km
        let ride = ActivityRecordBuilder::new(Utc::now(), "Ride", 120.0)
            .distance_km(40.0)
            .elevation_gain_m(350.0)
            .average_speed(1000.0 / 300.0)
            .build();
        assert_eq!(LoadModel::for_activity(&ride), LoadModel::Estimated);
        let expected = 120.0 * 0.75 * 0.8 * 1.3;
        assert!((activity_load(&ride, &reference()) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_heart_rate_uses_estimate() {
        let walk = ActivityRecordBuilder::new(Utc::now(), "Walk", 60.0)
            .average_heart_rate(0)
            .build();
        assert_eq!(LoadModel::for_activity(&walk), LoadModel::Estimated);
        assert!((activity_load(&walk, &reference()) - 60.0 * 0.6 * 0.4).abs() < 1e-9);
    }
}
