// ABOUTME: Per-athlete threshold multipliers, learning speed and feedback signal counters
// ABOUTME: Persisted state the learner adjusts and the decision engine reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::learning::{
    MIN_SIGNALS_CONSERVATIVE, MIN_SIGNALS_CUSTOM_DEFAULT, MIN_SIGNALS_FAST, MIN_SIGNALS_MODERATE,
    MULTIPLIER_MAX, MULTIPLIER_MIN, MULTIPLIER_NEUTRAL,
};
use crate::errors::AppError;

/// How much evidence the learner needs before moving a multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningSpeed {
    /// Ten signals per category
    Conservative,
    /// Five signals per category
    #[default]
    Moderate,
    /// Three signals per category
    Fast,
    /// Athlete-chosen count
    Custom,
}

impl LearningSpeed {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Fast => "fast",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for LearningSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningSpeed {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "fast" => Ok(Self::Fast),
            "custom" => Ok(Self::Custom),
            other => Err(AppError::invalid_input(format!(
                "unknown learning speed '{other}', expected conservative, moderate, fast or custom"
            ))),
        }
    }
}

/// Followed/ignored tallies for one learning category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTally {
    /// Recommendations followed
    pub followed: u32,
    /// Recommendations ignored
    pub ignored: u32,
}

impl SignalTally {
    /// Total signals
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.followed + self.ignored
    }

    /// Share of ignored signals, 0 when empty
    #[must_use]
    pub fn ignore_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            f64::from(self.ignored) / f64::from(total)
        }
    }

    /// Record one signal
    pub fn record(&mut self, followed: bool) {
        if followed {
            self.followed += 1;
        } else {
            self.ignored += 1;
        }
    }
}

/// Signal tallies derived from the most recent feedback window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounters {
    /// Rest-class recommendations
    pub rest: SignalTally,
    /// Reduce-class recommendations
    pub reduce: SignalTally,
    /// Increase-class recommendations
    pub increase: SignalTally,
    /// Maintain-class recommendations, counted but never used to adjust
    pub maintain: SignalTally,
}

impl SignalCounters {
    /// Signals across all classes
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.rest.total() + self.reduce.total() + self.increase.total() + self.maintain.total()
    }

    /// Ignored signals across all classes
    #[must_use]
    pub const fn ignored(&self) -> u32 {
        self.rest.ignored + self.reduce.ignored + self.increase.ignored + self.maintain.ignored
    }

    /// Ignore rate across all classes, 0 when empty
    #[must_use]
    pub fn ignore_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            f64::from(self.ignored()) / f64::from(total)
        }
    }
}

/// Named multiplier in a threshold profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// Scales the ACWR injury-risk threshold
    AcwrDanger,
    /// Scales the ACWR elevated-load threshold
    AcwrCaution,
    /// Scales the TSB fatigue threshold
    TsbRest,
    /// Scales the TSB freshness threshold that gates quality days
    TsbReduce,
    /// Scales the low-readiness threshold
    ReadinessLow,
}

impl ThresholdKind {
    /// All multipliers in storage order
    pub const ALL: [Self; 5] = [
        Self::AcwrDanger,
        Self::AcwrCaution,
        Self::TsbRest,
        Self::TsbReduce,
        Self::ReadinessLow,
    ];

    /// Stable snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcwrDanger => "acwr_danger",
            Self::AcwrCaution => "acwr_caution",
            Self::TsbRest => "tsb_rest",
            Self::TsbReduce => "tsb_reduce",
            Self::ReadinessLow => "readiness_low",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal threshold state for one athlete
///
/// Every multiplier stays inside `[MULTIPLIER_MIN, MULTIPLIER_MAX]`; use
/// [`ThresholdProfile::set_multiplier`] to change one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    acwr_danger_multiplier: f64,
    acwr_caution_multiplier: f64,
    tsb_rest_multiplier: f64,
    tsb_reduce_multiplier: f64,
    readiness_low_multiplier: f64,
    /// Tallies from the last learning run
    pub counters: SignalCounters,
    /// Feedback rows inspected by the last learning run
    pub total_feedbacks_analyzed: u32,
    /// Configured learning speed
    pub learning_speed: LearningSpeed,
    /// Signal count used with [`LearningSpeed::Custom`]
    pub custom_min_signals: Option<u32>,
    /// Last time the learner ran
    pub last_analyzed_at: Option<DateTime<Utc>>,
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self {
            acwr_danger_multiplier: MULTIPLIER_NEUTRAL,
            acwr_caution_multiplier: MULTIPLIER_NEUTRAL,
            tsb_rest_multiplier: MULTIPLIER_NEUTRAL,
            tsb_reduce_multiplier: MULTIPLIER_NEUTRAL,
            readiness_low_multiplier: MULTIPLIER_NEUTRAL,
            counters: SignalCounters::default(),
            total_feedbacks_analyzed: 0,
            learning_speed: LearningSpeed::default(),
            custom_min_signals: None,
            last_analyzed_at: None,
        }
    }
}

impl ThresholdProfile {
    /// Neutral profile with the given learning speed
    #[must_use]
    pub fn with_speed(learning_speed: LearningSpeed) -> Self {
        Self {
            learning_speed,
            ..Self::default()
        }
    }

    /// Current value of a multiplier
    #[must_use]
    pub const fn multiplier(&self, kind: ThresholdKind) -> f64 {
        match kind {
            ThresholdKind::AcwrDanger => self.acwr_danger_multiplier,
            ThresholdKind::AcwrCaution => self.acwr_caution_multiplier,
            ThresholdKind::TsbRest => self.tsb_rest_multiplier,
            ThresholdKind::TsbReduce => self.tsb_reduce_multiplier,
            ThresholdKind::ReadinessLow => self.readiness_low_multiplier,
        }
    }

    /// Set a multiplier, clamped into the allowed range; returns the stored value
    pub fn set_multiplier(&mut self, kind: ThresholdKind, value: f64) -> f64 {
        let clamped = clamp_multiplier(value);
        match kind {
            ThresholdKind::AcwrDanger => self.acwr_danger_multiplier = clamped,
            ThresholdKind::AcwrCaution => self.acwr_caution_multiplier = clamped,
            ThresholdKind::TsbRest => self.tsb_rest_multiplier = clamped,
            ThresholdKind::TsbReduce => self.tsb_reduce_multiplier = clamped,
            ThresholdKind::ReadinessLow => self.readiness_low_multiplier = clamped,
        }
        clamped
    }

    /// Signals per category required before a multiplier moves
    #[must_use]
    pub fn min_signals(&self) -> u32 {
        match self.learning_speed {
            LearningSpeed::Conservative => MIN_SIGNALS_CONSERVATIVE,
            LearningSpeed::Moderate => MIN_SIGNALS_MODERATE,
            LearningSpeed::Fast => MIN_SIGNALS_FAST,
            LearningSpeed::Custom => self
                .custom_min_signals
                .unwrap_or(MIN_SIGNALS_CUSTOM_DEFAULT),
        }
    }

    /// Put every multiplier back to neutral and clear the counters
    ///
    /// The learning speed and custom signal count are preserved.
    pub fn reset(&mut self) {
        for kind in ThresholdKind::ALL {
            self.set_multiplier(kind, MULTIPLIER_NEUTRAL);
        }
        self.counters = SignalCounters::default();
        self.total_feedbacks_analyzed = 0;
        self.last_analyzed_at = None;
    }
}

/// Clamp a multiplier into the allowed range, mapping NaN to neutral
#[must_use]
pub fn clamp_multiplier(value: f64) -> f64 {
    if value.is_nan() {
        MULTIPLIER_NEUTRAL
    } else {
        value.clamp(MULTIPLIER_MIN, MULTIPLIER_MAX)
    }
}
