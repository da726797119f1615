// ABOUTME: Deterministic rule cascade turning an athlete state into today's training decision
// ABOUTME: First matching rule wins; every decision carries two prescriptions and a rationale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Decision engine
//!
//! Rules are evaluated in a fixed priority order:
//!
//! 1. Fewer than three activities: insufficient data
//! 2. ACWR above the danger threshold or high risk: active recovery
//! 3. ACWR above the caution threshold or moderate risk: easy
//! 4. TSB below the fatigue threshold: recovery
//! 5. TSB above the freshness threshold with CTL above 5: quality
//! 6. Four or more days since the last activity: comeback
//! 7. Otherwise: moderate
//!
//! Thresholds are the base constants scaled by the athlete's learned
//! multipliers. Risk bands are measured against the same effective
//! thresholds, so a learned tolerance actually moves the decision.

use std::fmt;

use morphy_core::constants::windows::MIN_ACTIVITIES_FOR_DECISION;
use morphy_core::errors::{AppError, AppResult};
use morphy_core::models::{HrPrecision, ThresholdProfile, TrainingAction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DecisionThresholds;
use crate::physiological_constants::{acwr as acwr_bands, confidence, readiness};
use crate::prescriptions::{
    nutrition_tip, prescribe, prescribe_starter, recovery_tip, PrescriptionPair,
    WorkoutPrescription,
};
use crate::training_load::{AthleteState, InjuryRisk};

/// Chronic load an athlete needs before quality work is suggested
const MIN_CTL_FOR_QUALITY: f64 = 5.0;
/// Rating of perceived effort at or above which the athlete reports feeling very hard
const HIGH_EFFORT_RPE: u8 = 8;
/// Duration scale for balanced days when readiness is low
const LOW_READINESS_DURATION_SCALE: f64 = 0.75;

/// Subjective effort on the 1-10 RPE scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PerceivedEffort(u8);

impl PerceivedEffort {
    /// Validate an RPE value
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless the value is between 1 and 10.
    pub fn new(rpe: u8) -> AppResult<Self> {
        if (1..=10).contains(&rpe) {
            Ok(Self(rpe))
        } else {
            Err(AppError::invalid_input(format!(
                "perceived effort must be between 1 and 10, got {rpe}"
            )))
        }
    }

    /// Raw RPE value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the athlete reports a very hard effort
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.0 >= HIGH_EFFORT_RPE
    }
}

impl TryFrom<u8> for PerceivedEffort {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PerceivedEffort> for u8 {
    fn from(effort: PerceivedEffort) -> Self {
        effort.0
    }
}

/// The rule that produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    /// Not enough activities to judge
    InsufficientData,
    /// Injury risk is high
    InjuryRisk,
    /// Load is elevated
    ElevatedLoad,
    /// Fatigue has accumulated
    AccumulatedFatigue,
    /// Athlete is fresh and fit
    FreshAndFit,
    /// Several days without activity
    ReturnFromBreak,
    /// Nothing stands out
    Balanced,
}

impl DecisionRule {
    /// Action this rule recommends
    #[must_use]
    pub const fn action(self) -> TrainingAction {
        match self {
            Self::InsufficientData | Self::Balanced => TrainingAction::Moderate,
            Self::InjuryRisk => TrainingAction::ActiveRecovery,
            Self::ElevatedLoad => TrainingAction::Easy,
            Self::AccumulatedFatigue => TrainingAction::Recovery,
            Self::FreshAndFit => TrainingAction::Quality,
            Self::ReturnFromBreak => TrainingAction::Comeback,
        }
    }

    /// Stable snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::InjuryRisk => "injury_risk",
            Self::ElevatedLoad => "elevated_load",
            Self::AccumulatedFatigue => "accumulated_fatigue",
            Self::FreshAndFit => "fresh_and_fit",
            Self::ReturnFromBreak => "return_from_break",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Today's recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Recommended action
    pub action: TrainingAction,
    /// Rule that fired
    pub rule: DecisionRule,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// One-line summary
    pub headline: String,
    /// Explanation with the numbers behind it
    pub reasoning: String,
    /// Present when load puts the athlete at risk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_note: Option<String>,
    /// Preferred session
    pub primary: WorkoutPrescription,
    /// Alternative session with the same target
    pub alternative: WorkoutPrescription,
    /// Optional nutrition advice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_tip: Option<String>,
    /// Optional recovery advice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_tip: Option<String>,
    /// Shown when heart-rate zones rely on population defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_hint: Option<String>,
    /// Thresholds the state was compared against
    pub thresholds: DecisionThresholds,
}

/// Pick the first rule that matches a state
#[must_use]
pub fn select_rule(state: &AthleteState, thresholds: &DecisionThresholds) -> DecisionRule {
    if state.activity_count < MIN_ACTIVITIES_FOR_DECISION {
        return DecisionRule::InsufficientData;
    }

    // the state's risk band uses the fixed ACWR edges, so it still fires
    // when personal multipliers have raised the thresholds
    if state.acwr > thresholds.acwr_danger || state.injury_risk == InjuryRisk::High {
        DecisionRule::InjuryRisk
    } else if state.acwr > thresholds.acwr_caution || state.injury_risk == InjuryRisk::Moderate {
        DecisionRule::ElevatedLoad
    } else if state.training_stress_balance < thresholds.tsb_fatigued {
        DecisionRule::AccumulatedFatigue
    } else if state.training_stress_balance > thresholds.tsb_fresh
        && state.chronic_load > MIN_CTL_FOR_QUALITY
    {
        DecisionRule::FreshAndFit
    } else if state
        .days_since_last
        .is_some_and(|days| days >= readiness::LONG_BREAK_DAYS)
    {
        DecisionRule::ReturnFromBreak
    } else {
        DecisionRule::Balanced
    }
}

/// Generate today's decision
///
/// Deterministic in its inputs: the same state, profile and effort always
/// produce the same action, confidence and text.
#[must_use]
pub fn generate_decision(
    state: &AthleteState,
    profile: Option<&ThresholdProfile>,
    perceived_effort: Option<PerceivedEffort>,
) -> Decision {
    let thresholds = DecisionThresholds::resolve(profile);
    let rule = select_rule(state, &thresholds);
    let action = rule.action();
    let reference = state.has_heart_rate_data.then_some(&state.heart_rate);

    let low_readiness =
        rule == DecisionRule::Balanced && state.readiness_score < thresholds.readiness_low;
    let prescriptions = if rule == DecisionRule::InsufficientData {
        prescribe_starter(reference)
    } else if low_readiness {
        prescribe(action, reference, LOW_READINESS_DURATION_SCALE)
    } else {
        prescribe(action, reference, 1.0)
    };

    let mut reasoning = reasoning_for(rule, state, &thresholds);
    if low_readiness {
        reasoning.push_str(&format!(
            " Readiness {:.0} is below {:.0}, so today's sessions are shortened.",
            state.readiness_score, thresholds.readiness_low
        ));
    }

    let mut confidence = confidence_for(rule, state, &thresholds);
    if let Some(effort) = perceived_effort.filter(|e| e.is_high()) {
        confidence = (confidence - confidence::HIGH_EFFORT_PENALTY).max(confidence::INSUFFICIENT_DATA);
        reasoning.push_str(&format!(
            " You rated recent effort {}/10; listen to your body and scale back if needed.",
            effort.value()
        ));
    }

    let precision_hint = (state.heart_rate.precision == HrPrecision::PopulationDefault)
        .then(|| state.heart_rate.precision_hint())
        .flatten()
        .map(str::to_owned);
    if let Some(hint) = &precision_hint {
        reasoning.push(' ');
        reasoning.push_str(hint);
    }

    debug!(
        rule = %rule,
        action = %action,
        confidence,
        acwr = state.acwr,
        tsb = state.training_stress_balance,
        "decision rule selected"
    );

    let PrescriptionPair {
        primary,
        alternative,
    } = prescriptions;

    Decision {
        action,
        rule,
        confidence,
        headline: headline_for(rule).to_owned(),
        reasoning,
        risk_note: risk_note_for(rule, state, &thresholds),
        primary,
        alternative,
        nutrition_tip: nutrition_tip(action).map(str::to_owned),
        recovery_tip: recovery_tip(action).map(str::to_owned),
        precision_hint,
        thresholds,
    }
}

fn scaled(min: f64, max: f64, fraction: f64) -> f64 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (max - min).mul_add(fraction, min)
}

fn confidence_for(rule: DecisionRule, state: &AthleteState, t: &DecisionThresholds) -> f64 {
    match rule {
        DecisionRule::InsufficientData => confidence::INSUFFICIENT_DATA,
        DecisionRule::InjuryRisk => scaled(
            confidence::INJURY_RISK_MIN,
            confidence::INJURY_RISK_MAX,
            (state.acwr - t.acwr_danger) / t.acwr_danger.max(f64::EPSILON),
        ),
        DecisionRule::ElevatedLoad => scaled(
            confidence::ELEVATED_LOAD_MIN,
            confidence::ELEVATED_LOAD_MAX,
            (state.acwr - t.acwr_caution) / (t.acwr_danger - t.acwr_caution).max(f64::EPSILON),
        ),
        DecisionRule::AccumulatedFatigue => confidence::FATIGUE,
        DecisionRule::FreshAndFit => scaled(
            confidence::FRESH_MIN,
            confidence::FRESH_MAX,
            (state.training_stress_balance - t.tsb_fresh) / t.tsb_fresh.abs().max(1.0),
        ),
        DecisionRule::ReturnFromBreak => confidence::COMEBACK,
        DecisionRule::Balanced => {
            if (acwr_bands::SWEET_SPOT_MIN..=acwr_bands::SWEET_SPOT_MAX).contains(&state.acwr) {
                confidence::BALANCED_SWEET_SPOT
            } else {
                confidence::BALANCED
            }
        }
    }
}

const fn headline_for(rule: DecisionRule) -> &'static str {
    match rule {
        DecisionRule::InsufficientData => "Not enough data yet for a personal recommendation",
        DecisionRule::InjuryRisk => "High injury risk: keep today to active recovery",
        DecisionRule::ElevatedLoad => "Load is elevated: go easy today",
        DecisionRule::AccumulatedFatigue => "Fatigue has built up: light technical session",
        DecisionRule::FreshAndFit => "Fresh and fit: make today a quality day",
        DecisionRule::ReturnFromBreak => "Several days off: time for a gentle comeback",
        DecisionRule::Balanced => "Everything is balanced: train as planned",
    }
}

fn reasoning_for(rule: DecisionRule, state: &AthleteState, t: &DecisionThresholds) -> String {
    match rule {
        DecisionRule::InsufficientData => format!(
            "Only {} activities recorded. About a week of data is needed for precise recommendations.",
            state.activity_count
        ),
        DecisionRule::InjuryRisk => format!(
            "Your acute:chronic workload ratio is {:.2}, {}. \
             Load has climbed faster than your fitness can absorb.",
            state.acwr,
            exceeded(state.acwr, t.acwr_danger, "danger", acwr_bands::MODERATE_RISK_MAX)
        ),
        DecisionRule::ElevatedLoad => format!(
            "Your acute:chronic workload ratio is {:.2}, {}. \
             Acute load ({:.1}) is outpacing chronic fitness ({:.1}).",
            state.acwr,
            exceeded(state.acwr, t.acwr_caution, "caution", acwr_bands::LOW_RISK_MAX),
            state.acute_load,
            state.chronic_load
        ),
        DecisionRule::AccumulatedFatigue => format!(
            "Training stress balance is {:.1}, below {:.1}. Recover before absorbing more quality work.",
            state.training_stress_balance, t.tsb_fatigued
        ),
        DecisionRule::FreshAndFit => format!(
            "Training stress balance is {:.1} and chronic load is {:.1}. Readiness is {:.0}/100.",
            state.training_stress_balance, state.chronic_load, state.readiness_score
        ),
        DecisionRule::ReturnFromBreak => format!(
            "{} days since your last activity. Too much rest erodes fitness; restart progressively.",
            state.days_since_last_or_sentinel()
        ),
        DecisionRule::Balanced => format!(
            "Balanced state. ACWR {:.2}, training stress balance {:.1}, readiness {:.0}/100.",
            state.acwr, state.training_stress_balance, state.readiness_score
        ),
    }
}

fn exceeded(acwr: f64, personal: f64, name: &str, band_edge: f64) -> String {
    if acwr > personal {
        format!("above your {name} threshold of {personal:.2}")
    } else {
        format!("above the standard risk band edge of {band_edge:.1}")
    }
}

fn risk_note_for(
    rule: DecisionRule,
    state: &AthleteState,
    t: &DecisionThresholds,
) -> Option<String> {
    match rule {
        DecisionRule::InjuryRisk => Some(format!(
            "ACWR {:.2} is well outside the 0.8-1.3 range. Light movement is fine, but stop if anything hurts and cut this week's volume by 40-50%.",
            state.acwr
        )),
        DecisionRule::ElevatedLoad => Some(format!(
            "ACWR {:.2} is approaching your limit of {:.2}. Reduce this week's volume by 20-30%.",
            state.acwr, t.acwr_danger
        )),
        _ => None,
    }
}
