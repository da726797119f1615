// ABOUTME: Coefficients used by the load, readiness, zone and phase algorithms
// ABOUTME: Values grouped by concern with references to the sports science they come from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Physiological constants based on sports science research
//!
//! Coefficients consumed by the algorithms in this crate. Each group names
//! the research it is derived from.

/// Banister TRIMP coefficients
///
/// Reference: Banister, E.W. (1991). Modeling elite athletic performance.
/// *Physiological Testing of Elite Athletes*.
pub mod trimp {
    /// Base multiplier applied to the heart rate reserve fraction
    pub const BASE_MULTIPLIER: f64 = 0.64;
    /// Exponential weighting of the heart rate reserve fraction
    pub const EXPONENTIAL_FACTOR: f64 = 1.92;
}

/// Intensity estimate used when an activity carries no heart-rate data
pub mod estimated_intensity {
    /// Pace faster than this (min/km) counts as hard
    pub const HARD_PACE_MIN_PER_KM: f64 = 4.5;
    /// Pace faster than this (min/km) counts as moderately hard
    pub const MODERATE_PACE_MIN_PER_KM: f64 = 5.5;
    /// Pace faster than this (min/km) counts as steady
    pub const STEADY_PACE_MIN_PER_KM: f64 = 7.0;
    /// Intensity for hard pace
    pub const HARD_INTENSITY: f64 = 0.9;
    /// Intensity for moderately hard pace
    pub const MODERATE_INTENSITY: f64 = 0.75;
    /// Intensity for steady pace, also the default without pace data
    pub const STEADY_INTENSITY: f64 = 0.6;
    /// Intensity for slow pace
    pub const EASY_INTENSITY: f64 = 0.45;

    /// Type weighting for running
    pub const RUN_FACTOR: f64 = 1.0;
    /// Type weighting for swimming
    pub const SWIM_FACTOR: f64 = 0.9;
    /// Type weighting for cycling
    pub const RIDE_FACTOR: f64 = 0.8;
    /// Type weighting for strength work
    pub const WEIGHT_TRAINING_FACTOR: f64 = 0.7;
    /// Type weighting for hiking
    pub const HIKE_FACTOR: f64 = 0.6;
    /// Type weighting for walking
    pub const WALK_FACTOR: f64 = 0.4;
    /// Type weighting for anything else
    pub const DEFAULT_FACTOR: f64 = 0.6;

    /// Elevation gain (m) above which the large climbing bonus applies
    pub const HIGH_ELEVATION_M: f64 = 300.0;
    /// Elevation gain (m) above which the small climbing bonus applies
    pub const MODERATE_ELEVATION_M: f64 = 100.0;
    /// Large climbing bonus
    pub const HIGH_ELEVATION_BONUS: f64 = 1.3;
    /// Small climbing bonus
    pub const MODERATE_ELEVATION_BONUS: f64 = 1.15;
}

/// Acute:chronic workload ratio bands
///
/// Reference: Gabbett, T.J. (2016). The training-injury prevention paradox.
/// <https://bjsm.bmj.com/content/50/5/273>
pub mod acwr {
    /// Upper bound of the low-risk band
    pub const LOW_RISK_MAX: f64 = 1.3;
    /// Upper bound of the moderate-risk band
    pub const MODERATE_RISK_MAX: f64 = 1.5;
    /// Lower bound of the sweet spot
    pub const SWEET_SPOT_MIN: f64 = 0.8;
    /// Upper bound of the sweet spot
    pub const SWEET_SPOT_MAX: f64 = 1.3;
    /// Below this ratio the athlete is detraining
    pub const DETRAINING_MAX: f64 = 0.5;
}

/// Readiness score composition
pub mod readiness {
    /// Neutral starting score
    pub const BASE_SCORE: f64 = 50.0;
    /// Points per unit of positive TSB
    pub const FRESH_TSB_WEIGHT: f64 = 2.0;
    /// Largest bonus from positive TSB
    pub const FRESH_TSB_CAP: f64 = 25.0;
    /// Points per unit of negative TSB
    pub const FATIGUE_TSB_WEIGHT: f64 = 1.5;
    /// Largest penalty from negative TSB
    pub const FATIGUE_TSB_CAP: f64 = -25.0;
    /// Bonus when ACWR sits in the sweet spot
    pub const SWEET_SPOT_BONUS: f64 = 15.0;
    /// Penalty when ACWR is above the moderate-risk band
    pub const HIGH_ACWR_PENALTY: f64 = -15.0;
    /// Penalty when ACWR shows detraining
    pub const DETRAINING_PENALTY: f64 = -5.0;
    /// Bonus the day after an activity
    pub const ONE_REST_DAY_BONUS: f64 = 5.0;
    /// Bonus two days after an activity
    pub const TWO_REST_DAYS_BONUS: f64 = 10.0;
    /// Days without activity after which readiness starts to fade
    pub const LONG_BREAK_DAYS: i64 = 4;
    /// Penalty after a long break
    pub const LONG_BREAK_PENALTY: f64 = -5.0;
    /// Lowest score
    pub const MIN_SCORE: f64 = 0.0;
    /// Highest score, also reported for an athlete with no history
    pub const MAX_SCORE: f64 = 100.0;
}

/// Karvonen heart rate reserve zones
///
/// Reference: Karvonen, M.J. et al. (1957). The effects of training on heart
/// rate; a longitudinal study. *Ann Med Exp Biol Fenn*, 35(3), 307-315.
pub mod karvonen {
    /// Reserve fraction where zone 2 starts
    pub const ZONE2_MIN: f64 = 0.6;
    /// Reserve fraction where zone 3 starts
    pub const ZONE3_MIN: f64 = 0.7;
    /// Reserve fraction where zone 4 starts
    pub const ZONE4_MIN: f64 = 0.8;
    /// Reserve fraction where zone 5 starts
    pub const ZONE5_MIN: f64 = 0.9;
    /// Lower bound of zone 1 used when prescribing heart-rate ranges
    pub const ZONE1_MIN: f64 = 0.5;
    /// Upper bound of zone 5
    pub const ZONE5_MAX: f64 = 1.0;
}

/// Compliance rules per action class
pub mod compliance {
    /// Longest session (minutes) still counted as a rest day
    pub const REST_MAX_DURATION_MIN: f64 = 25.0;
}

/// Decision engine confidence levels
pub mod confidence {
    /// Too little history to decide
    pub const INSUFFICIENT_DATA: f64 = 0.3;
    /// Injury-risk rule, lower bound
    pub const INJURY_RISK_MIN: f64 = 0.85;
    /// Injury-risk rule, upper bound
    pub const INJURY_RISK_MAX: f64 = 0.92;
    /// Elevated-load rule, lower bound
    pub const ELEVATED_LOAD_MIN: f64 = 0.8;
    /// Elevated-load rule, upper bound
    pub const ELEVATED_LOAD_MAX: f64 = 0.85;
    /// Accumulated fatigue rule
    pub const FATIGUE: f64 = 0.75;
    /// Fresh-and-fit rule, lower bound
    pub const FRESH_MIN: f64 = 0.8;
    /// Fresh-and-fit rule, upper bound
    pub const FRESH_MAX: f64 = 0.85;
    /// Return after a break
    pub const COMEBACK: f64 = 0.7;
    /// Balanced load inside the ACWR sweet spot
    pub const BALANCED_SWEET_SPOT: f64 = 0.75;
    /// Balanced load outside the sweet spot
    pub const BALANCED: f64 = 0.7;
    /// Reduction applied when the athlete reports very high perceived effort
    pub const HIGH_EFFORT_PENALTY: f64 = 0.05;
}

/// Periodization phase gates
pub mod periodization {
    /// TSB below which a deload is required
    pub const DELOAD_TSB: f64 = -20.0;
    /// ACWR above which a deload is required
    pub const DELOAD_ACWR: f64 = 1.3;
    /// Compliance (%) below which a deload is required
    pub const DELOAD_COMPLIANCE: f64 = 35.0;
    /// Base deload confidence before TSB scaling
    pub const DELOAD_CONFIDENCE_BASE: f64 = 0.70;
    /// Confidence added per TSB point
    pub const DELOAD_CONFIDENCE_PER_TSB: f64 = 0.01;
    /// Deload confidence cap
    pub const DELOAD_CONFIDENCE_MAX: f64 = 0.95;
    /// Minimum CTL for a peak
    pub const PEAK_CTL: f64 = 60.0;
    /// Minimum TSB for a peak
    pub const PEAK_TSB: f64 = -5.0;
    /// Minimum compliance (%) for a peak
    pub const PEAK_COMPLIANCE: f64 = 70.0;
    /// Peak confidence
    pub const PEAK_CONFIDENCE: f64 = 0.85;
    /// TSB below which a productive block counts as build
    pub const BUILD_TSB: f64 = -5.0;
    /// Build confidence
    pub const BUILD_CONFIDENCE: f64 = 0.7;
    /// Base confidence
    pub const BASE_CONFIDENCE: f64 = 0.6;
}
