// ABOUTME: Domain constants for the Morphy workspace grouped by concern
// ABOUTME: Analysis windows, heart-rate defaults, learner bounds and lookback limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants organized by domain. Algorithm coefficients (TRIMP
//! weighting, readiness adjustments, zone boundaries) live next to the
//! algorithms in `morphy_intelligence::physiological_constants`.

/// Heart-rate reference defaults used when an athlete has no measured values
pub mod heart_rate {
    /// Population default maximum heart rate (bpm)
    pub const DEFAULT_MAX_HR: u32 = 182;
    /// Population default resting heart rate (bpm)
    pub const DEFAULT_REST_HR: u32 = 50;
    /// Lowest plausible heart rate accepted from a profile (bpm)
    pub const MIN_PLAUSIBLE_HR: u32 = 25;
    /// Highest plausible heart rate accepted from a profile (bpm)
    pub const MAX_PLAUSIBLE_HR: u32 = 240;
}

/// Analysis windows in days
pub mod windows {
    /// Acute training load window (ATL)
    pub const ACUTE_DAYS: u32 = 7;
    /// Chronic training load window (CTL)
    pub const CHRONIC_DAYS: u32 = 42;
    /// Activity history handed to the estimator by callers
    pub const ACTIVITY_HISTORY_DAYS: u32 = 42;
    /// Minimum activities before a decision is considered data-backed
    pub const MIN_ACTIVITIES_FOR_DECISION: usize = 3;
    /// Sentinel reported as days-since-last when the athlete has no activities
    pub const NO_ACTIVITY_SENTINEL_DAYS: i64 = 999;
}

/// Threshold learner bounds
pub mod learning {
    /// Lower bound of every threshold multiplier
    pub const MULTIPLIER_MIN: f64 = 0.70;
    /// Upper bound of every threshold multiplier
    pub const MULTIPLIER_MAX: f64 = 1.30;
    /// Neutral multiplier
    pub const MULTIPLIER_NEUTRAL: f64 = 1.0;
    /// Size of one learning step
    pub const STEP: f64 = 0.03;
    /// Number of most recent feedback rows considered per learning run
    pub const FEEDBACK_WINDOW: usize = 100;
    /// Minimum signals for the conservative learning speed
    pub const MIN_SIGNALS_CONSERVATIVE: u32 = 10;
    /// Minimum signals for the moderate learning speed
    pub const MIN_SIGNALS_MODERATE: u32 = 5;
    /// Minimum signals for the fast learning speed
    pub const MIN_SIGNALS_FAST: u32 = 3;
    /// Fallback when a custom speed has no count configured
    pub const MIN_SIGNALS_CUSTOM_DEFAULT: u32 = 5;
    /// Smallest accepted custom signal count
    pub const CUSTOM_MIN_SIGNALS_LOWER: u32 = 1;
    /// Largest accepted custom signal count
    pub const CUSTOM_MIN_SIGNALS_UPPER: u32 = 50;
    /// Deviation from neutral above which a multiplier is reported as adjusted
    pub const ADJUSTED_REPORT_TOLERANCE: f64 = 0.05;
}

/// Compliance reconstruction lookbacks in days
pub mod compliance {
    /// Lookback used by the periodic sync job
    pub const SYNC_LOOKBACK_DAYS: u32 = 7;
    /// Lookback used when a new-activity webhook arrives
    pub const WEBHOOK_LOOKBACK_DAYS: u32 = 3;
    /// Window used by the phase detector to aggregate compliance
    pub const PHASE_WINDOW_DAYS: i64 = 7;
    /// Rate reported when no inferred rows exist in the phase window
    pub const NEUTRAL_RATE_PERCENT: f64 = 50.0;
}
