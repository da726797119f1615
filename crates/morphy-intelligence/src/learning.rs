// ABOUTME: Adaptive threshold learner that tunes personal multipliers from recommendation feedback
// ABOUTME: Recomputes signal counters from the recent window and reports every adjustment made
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptive threshold learning
//!
//! Feedback rows are bucketed by [`ActionClass`]. A class whose
//! recommendations are ignored often moves its multiplier up (more
//! tolerant); a class that is followed consistently over plenty of signals
//! moves it down by half a step (stricter). Maintain-class rows count toward
//! the totals but never move a multiplier.
//!
//! Counters are recomputed from the most recent [`FEEDBACK_WINDOW`] rows on
//! every run. They describe that window, not the athlete's whole history.

use chrono::{DateTime, Utc};
use morphy_core::constants::learning::{
    ADJUSTED_REPORT_TOLERANCE, FEEDBACK_WINDOW, MULTIPLIER_NEUTRAL, STEP,
};
use morphy_core::models::{
    ActionClass, FeedbackRecord, LearningSpeed, SignalCounters, SignalTally, ThresholdKind,
    ThresholdProfile,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DecisionThresholds;

/// Ignore rate below which a well-sampled class becomes stricter
const FOLLOW_THRESHOLD: f64 = 0.2;
/// Overall ignore rate above which general fatigue tolerance rises
const GENERAL_FATIGUE_IGNORE_RATE: f64 = 0.7;

struct CategoryRule {
    label: &'static str,
    threshold: ThresholdKind,
    ignore_threshold: f64,
    tally: fn(&SignalCounters) -> SignalTally,
}

const fn rest_tally(counters: &SignalCounters) -> SignalTally {
    counters.rest
}

const fn reduce_tally(counters: &SignalCounters) -> SignalTally {
    counters.reduce
}

const fn increase_tally(counters: &SignalCounters) -> SignalTally {
    counters.increase
}

const CATEGORY_RULES: [CategoryRule; 3] = [
    CategoryRule {
        label: "Rest",
        threshold: ThresholdKind::AcwrDanger,
        ignore_threshold: 0.6,
        tally: rest_tally,
    },
    CategoryRule {
        label: "Reduce",
        threshold: ThresholdKind::AcwrCaution,
        ignore_threshold: 0.65,
        tally: reduce_tally,
    },
    CategoryRule {
        label: "Quality",
        threshold: ThresholdKind::TsbReduce,
        ignore_threshold: 0.7,
        tally: increase_tally,
    },
];

/// Whether a learning run had anything to work with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    /// No feedback rows exist; the profile is unchanged
    NoFeedback,
    /// Counters were recomputed and multipliers re-evaluated
    Updated,
}

/// Which way a multiplier moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Multiplier went up
    IncreasedTolerance,
    /// Multiplier went down
    DecreasedTolerance,
}

/// One multiplier change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAdjustment {
    /// Multiplier that moved
    pub threshold: ThresholdKind,
    /// Direction of the move
    pub direction: AdjustmentDirection,
    /// Value before the run
    pub old_value: f64,
    /// Value after clamping
    pub new_value: f64,
    /// Why it moved
    pub reason: String,
}

/// Summary of one learning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentReport {
    /// Run status
    pub status: AdjustmentStatus,
    /// Signals in the analysed window
    pub total_signals: u32,
    /// Signals needed per class
    pub min_signals_required: u32,
    /// Whether the window holds at least `min_signals_required` signals
    pub learning_active: bool,
    /// Multipliers that changed
    pub adjustments: Vec<ThresholdAdjustment>,
}

/// New profile plus the report describing how it was reached
#[derive(Debug, Clone, PartialEq)]
pub struct LearningOutcome {
    /// Profile to persist
    pub profile: ThresholdProfile,
    /// What happened
    pub report: AdjustmentReport,
}

/// Tally followed and ignored signals per action class over the recent window
///
/// Rows are ordered newest first and cut at [`FEEDBACK_WINDOW`] before counting.
#[must_use]
pub fn count_signals(feedback: &[FeedbackRecord]) -> SignalCounters {
    let mut recent: Vec<&FeedbackRecord> = feedback.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    let mut counters = SignalCounters::default();
    for record in recent.into_iter().take(FEEDBACK_WINDOW) {
        let tally = match record.action.class() {
            ActionClass::Rest => &mut counters.rest,
            ActionClass::Reduce => &mut counters.reduce,
            ActionClass::Increase => &mut counters.increase,
            ActionClass::Maintain => &mut counters.maintain,
        };
        tally.record(record.followed);
    }
    counters
}

/// Analyse feedback and derive the adjusted profile
///
/// The input profile is not modified. With no feedback the outcome carries an
/// unchanged copy and a [`AdjustmentStatus::NoFeedback`] report.
#[must_use]
pub fn analyze_and_adjust(
    feedback: &[FeedbackRecord],
    profile: &ThresholdProfile,
    now: DateTime<Utc>,
) -> LearningOutcome {
    let min_signals = profile.min_signals();

    if feedback.is_empty() {
        return LearningOutcome {
            profile: profile.clone(),
            report: AdjustmentReport {
                status: AdjustmentStatus::NoFeedback,
                total_signals: 0,
                min_signals_required: min_signals,
                learning_active: false,
                adjustments: Vec::new(),
            },
        };
    }

    let counters = count_signals(feedback);
    let mut updated = profile.clone();
    let mut adjustments = Vec::new();

    for rule in &CATEGORY_RULES {
        let tally = (rule.tally)(&counters);
        if tally.total() < min_signals {
            continue;
        }
        let rate = tally.ignore_rate();
        if rate > rule.ignore_threshold {
            let reason = format!(
                "{} recommendations ignored {:.0}% of the time",
                rule.label,
                rate * 100.0
            );
            push_adjustment(&mut updated, &mut adjustments, rule.threshold, STEP, reason);
        } else if rate < FOLLOW_THRESHOLD && tally.total() >= min_signals * 2 {
            let reason = format!("{} recommendations followed consistently", rule.label);
            push_adjustment(&mut updated, &mut adjustments, rule.threshold, -STEP / 2.0, reason);
        }
    }

    if counters.total() >= min_signals * 2
        && counters.ignore_rate() > GENERAL_FATIGUE_IGNORE_RATE
    {
        push_adjustment(
            &mut updated,
            &mut adjustments,
            ThresholdKind::TsbRest,
            STEP / 2.0,
            "High general fatigue tolerance".to_owned(),
        );
    }

    updated.counters = counters;
    updated.total_feedbacks_analyzed = counters.total();
    updated.last_analyzed_at = Some(now);

    let total_signals = counters.total();
    if !adjustments.is_empty() {
        info!(
            adjustments = adjustments.len(),
            total_signals,
            min_signals,
            "threshold multipliers adjusted"
        );
    }

    LearningOutcome {
        profile: updated,
        report: AdjustmentReport {
            status: AdjustmentStatus::Updated,
            total_signals,
            min_signals_required: min_signals,
            learning_active: total_signals >= min_signals,
            adjustments,
        },
    }
}

fn push_adjustment(
    profile: &mut ThresholdProfile,
    adjustments: &mut Vec<ThresholdAdjustment>,
    threshold: ThresholdKind,
    delta: f64,
    reason: String,
) {
    let old_value = profile.multiplier(threshold);
    let new_value = profile.set_multiplier(threshold, old_value + delta);
    if (new_value - old_value).abs() < f64::EPSILON {
        return;
    }
    adjustments.push(ThresholdAdjustment {
        threshold,
        direction: if new_value > old_value {
            AdjustmentDirection::IncreasedTolerance
        } else {
            AdjustmentDirection::DecreasedTolerance
        },
        old_value,
        new_value,
        reason,
    });
}

/// How a personalised threshold differs from the base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdTendency {
    /// Multiplier above 1
    MoreTolerant,
    /// Multiplier below 1
    MoreConservative,
}

/// A threshold whose multiplier has drifted away from neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedThreshold {
    /// Which threshold
    pub threshold: ThresholdKind,
    /// Current multiplier
    pub multiplier: f64,
    /// Base value
    pub base_value: f64,
    /// Personalised value
    pub effective_value: f64,
    /// Direction of the drift
    pub tendency: ThresholdTendency,
}

/// Snapshot of what the learner knows about an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStatus {
    /// Enough signals have been analysed for learning to matter
    pub learning_active: bool,
    /// Configured speed
    pub learning_speed: LearningSpeed,
    /// Signals needed per class
    pub min_signals_required: u32,
    /// Signals in the last analysed window
    pub total_analyzed: u32,
    /// Percentage of the evidence considered mature, 0-100
    pub personalization_score: u32,
    /// Per-class tallies
    pub signals: SignalCounters,
    /// Thresholds the decision engine currently applies
    pub effective_thresholds: DecisionThresholds,
    /// Thresholds that moved more than the report tolerance
    pub adjusted_thresholds: Vec<AdjustedThreshold>,
    /// When the learner last ran
    pub last_analyzed_at: Option<DateTime<Utc>>,
}

/// Describe the personalisation state of a profile
#[must_use]
pub fn learning_status(profile: &ThresholdProfile) -> LearningStatus {
    let min_signals = profile.min_signals();
    let total = profile.total_feedbacks_analyzed;
    let mature = (min_signals * 3).max(1);
    let personalization_score = (u64::from(total) * 100 / u64::from(mature)).min(100) as u32;

    let base = DecisionThresholds::default();
    let effective = DecisionThresholds::from_profile(profile);
    let adjusted_thresholds = ThresholdKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let multiplier = profile.multiplier(kind);
            if (multiplier - MULTIPLIER_NEUTRAL).abs() <= ADJUSTED_REPORT_TOLERANCE {
                return None;
            }
            Some(AdjustedThreshold {
                threshold: kind,
                multiplier,
                base_value: base.value(kind),
                effective_value: effective.value(kind),
                tendency: if multiplier > MULTIPLIER_NEUTRAL {
                    ThresholdTendency::MoreTolerant
                } else {
                    ThresholdTendency::MoreConservative
                },
            })
        })
        .collect();

    LearningStatus {
        learning_active: total >= min_signals,
        learning_speed: profile.learning_speed,
        min_signals_required: min_signals,
        total_analyzed: total,
        personalization_score,
        signals: profile.counters,
        effective_thresholds: effective,
        adjusted_thresholds,
        last_analyzed_at: profile.last_analyzed_at,
    }
}
