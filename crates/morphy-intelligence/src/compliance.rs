// ABOUTME: Compliance inference comparing a day's main activity with the recommendation it had
// ABOUTME: Reconstructs past decisions from data visible at each day's end without look-ahead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Compliance inference
//!
//! For every day of a lookback window the fold:
//!
//! 1. Takes the activities that started strictly before the end of that day
//! 2. Re-estimates the athlete state and the decision it would have produced
//! 3. Picks the longest activity of that calendar day as the main activity
//! 4. Classifies the main activity into a Karvonen zone and judges it against
//!    the decision's action class
//!
//! Activities are sorted once; each day's visible set is a prefix of that
//! order, cut with a strict `<` on the day boundary.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use morphy_core::errors::{AppError, AppResult};
use morphy_core::models::{
    ActionClass, ActivityRecord, FeedbackRecord, HeartRateReference, InferenceDetails,
    MetricsSnapshot, ThresholdProfile, TrainingAction, TrainingZone,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::zones::classify_karvonen;
use crate::decision_engine::{generate_decision, DecisionRule};
use crate::physiological_constants::compliance::REST_MAX_DURATION_MIN;
use crate::training_load::{AthleteState, TrainingLoadEstimator};

/// Heart rate and duration of the day's main activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Average heart rate (bpm), `None` when not recorded or zero
    pub average_heart_rate: Option<f64>,
    /// Duration in minutes, `None` when not recorded or zero
    pub duration_minutes: Option<f64>,
}

impl ActivitySummary {
    /// Summary of one activity
    #[must_use]
    pub fn from_activity(activity: &ActivityRecord) -> Self {
        Self {
            average_heart_rate: activity.usable_heart_rate(),
            duration_minutes: Some(activity.duration_minutes()).filter(|d| *d > 0.0),
        }
    }

    /// Heart rate and duration when both are usable
    fn measurable(&self) -> Option<(f64, f64)> {
        match (self.average_heart_rate, self.duration_minutes) {
            (Some(hr), Some(duration)) if hr > 0.0 => Some((hr, duration)),
            _ => None,
        }
    }
}

/// Outcome of comparing an activity with a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// Whether the recommendation was followed
    pub followed: bool,
    /// Zone the activity fell into, `None` without measurable activity
    pub zone: TrainingZone,
    /// Human-readable explanation
    pub reason: String,
}

/// Judge whether an activity matches a recommended action
///
/// An activity without usable heart rate and duration counts as no
/// measurable activity: only rest-class recommendations are satisfied by it.
#[must_use]
pub fn infer_compliance(
    action: TrainingAction,
    summary: Option<&ActivitySummary>,
    reference: &HeartRateReference,
) -> ComplianceVerdict {
    let class = action.class();

    let Some((avg_hr, duration)) = summary.and_then(ActivitySummary::measurable) else {
        let what = if summary.is_some() {
            "Activity without heart-rate data"
        } else {
            "No activity"
        };
        return if class == ActionClass::Rest {
            verdict(true, TrainingZone::None, format!("{what}: {action} respected"))
        } else {
            verdict(
                false,
                TrainingZone::None,
                format!("{what} although {action} was recommended"),
            )
        };
    };

    let zone = classify_karvonen(avg_hr, reference);
    let level = zone.number();

    match class {
        ActionClass::Rest => {
            if level <= 1 && duration <= REST_MAX_DURATION_MIN {
                verdict(
                    true,
                    zone,
                    format!("Very light {zone} activity ({duration:.0} min): {action} respected"),
                )
            } else {
                verdict(
                    false,
                    zone,
                    format!("Trained in {zone} ({duration:.0} min) when {action} was recommended"),
                )
            }
        }
        ActionClass::Reduce => {
            if level <= 2 {
                verdict(true, zone, format!("Intensity in {zone}: {action} followed"))
            } else {
                verdict(
                    false,
                    zone,
                    format!("Trained in {zone} when {action} was recommended (target Z1-Z2)"),
                )
            }
        }
        ActionClass::Maintain => {
            if (1..=3).contains(&level) {
                verdict(true, zone, format!("Suitable intensity in {zone}: {action} followed"))
            } else {
                verdict(
                    false,
                    zone,
                    format!("Trained in {zone}, above {action} (target Z1-Z3)"),
                )
            }
        }
        ActionClass::Increase => {
            if level >= 3 {
                verdict(true, zone, format!("Good intensity in {zone}: {action} followed"))
            } else {
                verdict(
                    false,
                    zone,
                    format!("Intensity too low in {zone} when {action} was recommended (target Z3+)"),
                )
            }
        }
    }
}

const fn verdict(followed: bool, zone: TrainingZone, reason: String) -> ComplianceVerdict {
    ComplianceVerdict {
        followed,
        zone,
        reason,
    }
}

/// Start of a UTC calendar day
#[must_use]
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Longest activity that started within a calendar day
///
/// Ties keep the earliest activity in the slice.
#[must_use]
pub fn main_activity(activities: &[ActivityRecord], day: NaiveDate) -> Option<&ActivityRecord> {
    let start = day_start(day);
    let end = start + Duration::days(1);
    activities
        .iter()
        .filter(|a| a.start_date() >= start && a.start_date() < end)
        .fold(None, |best: Option<&ActivityRecord>, candidate| match best {
            Some(current) if current.duration_minutes() >= candidate.duration_minutes() => {
                Some(current)
            }
            _ => Some(candidate),
        })
}

/// Everything reconstructed for one past day
#[derive(Debug, Clone, PartialEq)]
pub struct DayReconstruction {
    /// Reconstructed day
    pub date: NaiveDate,
    /// State visible at the end of that day
    pub state: AthleteState,
    /// Rule that would have fired
    pub rule: DecisionRule,
    /// Action that would have been recommended
    pub action: TrainingAction,
    /// Main activity summary, if the athlete trained that day
    pub summary: Option<ActivitySummary>,
    /// Compliance judgement
    pub verdict: ComplianceVerdict,
}

impl DayReconstruction {
    /// Auto-inferred feedback row for this day
    #[must_use]
    pub fn to_feedback(&self) -> FeedbackRecord {
        FeedbackRecord::auto_inferred(
            day_start(self.date),
            self.action,
            self.verdict.followed,
            MetricsSnapshot {
                acwr: Some(self.state.acwr),
                tsb: Some(self.state.training_stress_balance),
                readiness: Some(self.state.readiness_score),
            },
            InferenceDetails {
                activity_avg_hr: self.summary.and_then(|s| s.average_heart_rate),
                activity_duration_min: self.summary.and_then(|s| s.duration_minutes),
                detected_zone: self.verdict.zone,
                reason: self.verdict.reason.clone(),
            },
        )
    }
}

/// Result of reconstructing one day
#[derive(Debug)]
pub enum DayOutcome {
    /// A verdict was produced
    Inferred(Box<DayReconstruction>),
    /// Nothing was visible yet on that day
    Skipped {
        /// Skipped day
        date: NaiveDate,
    },
    /// Reconstruction failed for that day
    Failed {
        /// Failed day
        date: NaiveDate,
        /// What went wrong
        error: AppError,
    },
}

impl DayOutcome {
    /// Day this outcome belongs to
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Inferred(day) => day.date,
            Self::Skipped { date } | Self::Failed { date, .. } => *date,
        }
    }
}

/// Counts reported after a backfill run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillSummary {
    /// Days in the lookback window
    pub days_analyzed: u32,
    /// Days with a stored verdict
    pub inferred: u32,
    /// Days with nothing visible
    pub skipped: u32,
    /// Days that failed
    pub errors: u32,
}

/// Reconstruct one past day from activities sorted by start time
///
/// Returns `Ok(None)` when no activity is visible by the end of `day`.
///
/// # Errors
///
/// Returns `InvalidInput` when a visible activity fails validation.
pub fn reconstruct_day(
    sorted: &[ActivityRecord],
    reference: HeartRateReference,
    day: NaiveDate,
    thresholds: Option<&ThresholdProfile>,
) -> AppResult<Option<DayReconstruction>> {
    let day_end = day_start(day) + Duration::days(1);
    let cutoff = sorted.partition_point(|a| a.start_date() < day_end);
    let visible = &sorted[..cutoff];
    if visible.is_empty() {
        return Ok(None);
    }
    for activity in visible {
        activity.validate()?;
    }

    let state = TrainingLoadEstimator::new().estimate_with_reference(visible, reference, day);
    let decision = generate_decision(&state, thresholds, None);
    let summary = main_activity(visible, day).map(ActivitySummary::from_activity);
    let verdict = infer_compliance(decision.action, summary.as_ref(), &reference);

    debug!(
        date = %day,
        action = %decision.action,
        zone = %verdict.zone,
        followed = verdict.followed,
        "reconstructed day"
    );

    Ok(Some(DayReconstruction {
        date: day,
        state,
        rule: decision.rule,
        action: decision.action,
        summary,
        verdict,
    }))
}

/// Fold over the `lookback_days` days strictly before `today`, oldest first
///
/// `thresholds` personalizes the reconstructed decisions; `None` uses the
/// default cascade, which is what the backfill service passes.
#[must_use]
pub fn reconstruct_window(
    activities: &[ActivityRecord],
    reference: HeartRateReference,
    today: NaiveDate,
    lookback_days: u32,
    thresholds: Option<&ThresholdProfile>,
) -> Vec<DayOutcome> {
    let mut sorted = activities.to_vec();
    sorted.sort_by_key(ActivityRecord::start_date);

    (1..=i64::from(lookback_days))
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            match reconstruct_day(&sorted, reference, date, thresholds) {
                Ok(Some(day)) => DayOutcome::Inferred(Box::new(day)),
                Ok(None) => DayOutcome::Skipped { date },
                Err(error) => DayOutcome::Failed { date, error },
            }
        })
        .collect()
}
