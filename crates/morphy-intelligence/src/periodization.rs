// ABOUTME: Training phase detection from load metrics and recent compliance
// ABOUTME: Ordered rule cascade: deload, peak, build, then base as the fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Periodization phase detection
//!
//! Rules are evaluated in priority order and the first match wins. New phases
//! are added by inserting a rule into [`PHASE_RULES`].

use std::fmt;

use chrono::{Duration, NaiveDate};
use morphy_core::constants::compliance::{NEUTRAL_RATE_PERCENT, PHASE_WINDOW_DAYS};
use morphy_core::models::{ActionClass, FeedbackRecord};
use serde::{Deserialize, Serialize};

use crate::physiological_constants::acwr::{SWEET_SPOT_MAX, SWEET_SPOT_MIN};
use crate::physiological_constants::periodization::{
    BASE_CONFIDENCE, BUILD_CONFIDENCE, BUILD_TSB, DELOAD_ACWR, DELOAD_COMPLIANCE,
    DELOAD_CONFIDENCE_BASE, DELOAD_CONFIDENCE_MAX, DELOAD_CONFIDENCE_PER_TSB, DELOAD_TSB,
    PEAK_COMPLIANCE, PEAK_CONFIDENCE, PEAK_CTL, PEAK_TSB,
};
use crate::training_load::AthleteState;

/// Compliance rates over the recent auto-inferred feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAggregates {
    /// Followed share of all auto-inferred rows, percent
    pub compliance_7d: f64,
    /// Followed share of increase-class rows, percent
    pub increase_compliance: f64,
    /// Auto-inferred rows in the window
    pub days_with_data: u32,
}

impl Default for ComplianceAggregates {
    fn default() -> Self {
        Self {
            compliance_7d: NEUTRAL_RATE_PERCENT,
            increase_compliance: NEUTRAL_RATE_PERCENT,
            days_with_data: 0,
        }
    }
}

impl ComplianceAggregates {
    /// Aggregate auto-inferred rows dated on or after `as_of - 7 days`
    ///
    /// Rates default to 50% when the window holds no rows.
    #[must_use]
    pub fn from_feedback(records: &[FeedbackRecord], as_of: NaiveDate) -> Self {
        let cutoff = as_of - Duration::days(PHASE_WINDOW_DAYS);
        let window = records
            .iter()
            .filter(|r| r.is_auto_inferred() && r.day() >= cutoff);

        let (mut total, mut followed) = (0_u32, 0_u32);
        let (mut inc_total, mut inc_followed) = (0_u32, 0_u32);
        for record in window {
            total += 1;
            followed += u32::from(record.followed);
            if record.action.class() == ActionClass::Increase {
                inc_total += 1;
                inc_followed += u32::from(record.followed);
            }
        }

        Self {
            compliance_7d: rate_percent(followed, total),
            increase_compliance: rate_percent(inc_followed, inc_total),
            days_with_data: total,
        }
    }
}

fn rate_percent(followed: u32, total: u32) -> f64 {
    if total == 0 {
        NEUTRAL_RATE_PERCENT
    } else {
        f64::from(followed) / f64::from(total) * 100.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Training phase tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Recovery week needed
    Deload,
    /// Competition form
    Peak,
    /// Productive loading
    Build,
    /// Aerobic foundation
    Base,
}

impl PhaseKind {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deload => "deload",
            Self::Peak => "peak",
            Self::Build => "build",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs the phase was judged on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseMetrics {
    /// Training stress balance
    pub tsb: f64,
    /// Acute to chronic workload ratio
    pub acwr: f64,
    /// Chronic training load
    pub ctl: f64,
    /// Acute training load
    pub atl: f64,
    /// 7-day compliance, percent, one decimal
    pub compliance_7d: f64,
    /// Increase-class compliance, percent, one decimal
    pub increase_compliance: f64,
    /// Auto-inferred rows in the window
    pub days_with_data: u32,
}

/// Detected training phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// Phase tag
    pub phase: PhaseKind,
    /// Display label
    pub label: String,
    /// What the metrics say
    pub description: String,
    /// What to do this week
    pub recommendation: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Metrics snapshot
    pub metrics: PhaseMetrics,
}

type PhaseRule = fn(&PhaseMetrics) -> Option<TrainingPhase>;

/// Phase rules in priority order
pub const PHASE_RULES: [PhaseRule; 4] = [deload, peak, build, base];

/// Classify the current training phase
#[must_use]
pub fn detect_phase(state: &AthleteState, aggregates: &ComplianceAggregates) -> TrainingPhase {
    let metrics = PhaseMetrics {
        tsb: state.training_stress_balance,
        acwr: state.acwr,
        ctl: state.chronic_load,
        atl: state.acute_load,
        compliance_7d: aggregates.compliance_7d,
        increase_compliance: aggregates.increase_compliance,
        days_with_data: aggregates.days_with_data,
    };
    let mut detected = PHASE_RULES
        .iter()
        .find_map(|rule| rule(&metrics))
        .unwrap_or_else(|| base_phase(metrics));
    // rules compare raw rates; only the reported snapshot is rounded
    detected.metrics.compliance_7d = round1(metrics.compliance_7d);
    detected.metrics.increase_compliance = round1(metrics.increase_compliance);
    detected
}

fn phase(
    kind: PhaseKind,
    label: &str,
    description: String,
    recommendation: &str,
    confidence: f64,
    metrics: PhaseMetrics,
) -> TrainingPhase {
    TrainingPhase {
        phase: kind,
        label: label.to_owned(),
        description,
        recommendation: recommendation.to_owned(),
        confidence,
        metrics,
    }
}

fn deload(m: &PhaseMetrics) -> Option<TrainingPhase> {
    let mut reasons = Vec::new();
    if m.tsb < DELOAD_TSB {
        reasons.push(format!("TSB at {:.1} (high fatigue)", m.tsb));
    }
    if m.acwr > DELOAD_ACWR {
        reasons.push(format!("ACWR at {:.2} (injury risk)", m.acwr));
    }
    if m.compliance_7d < DELOAD_COMPLIANCE {
        reasons.push(format!("Compliance {:.0}%", m.compliance_7d));
    }
    if reasons.is_empty() {
        return None;
    }
    let confidence = DELOAD_CONFIDENCE_PER_TSB
        .mul_add(m.tsb.abs(), DELOAD_CONFIDENCE_BASE)
        .min(DELOAD_CONFIDENCE_MAX);
    Some(phase(
        PhaseKind::Deload,
        "Deload week",
        format!("Your body needs recovery. {}.", reasons.join(" | ")),
        "Prioritise Z1-Z2, keep sessions under 45 min and sleep plenty.",
        confidence,
        *m,
    ))
}

fn peak(m: &PhaseMetrics) -> Option<TrainingPhase> {
    (m.ctl >= PEAK_CTL && m.tsb >= PEAK_TSB && m.compliance_7d >= PEAK_COMPLIANCE).then(|| {
        phase(
            PhaseKind::Peak,
            "Peak form",
            format!(
                "CTL {:.0}, TSB {:.1}, compliance {:.0}%. Competition form.",
                m.ctl, m.tsb, m.compliance_7d
            ),
            "Hold the rhythm and add one weekly quality session. A good time to race.",
            PEAK_CONFIDENCE,
            *m,
        )
    })
}

fn build(m: &PhaseMetrics) -> Option<TrainingPhase> {
    let productive = (SWEET_SPOT_MIN..=SWEET_SPOT_MAX).contains(&m.acwr);
    (productive && m.tsb < BUILD_TSB).then(|| {
        phase(
            PhaseKind::Build,
            "Build phase",
            format!(
                "ACWR {:.2} in the productive range with TSB {:.1}. Fitness is growing.",
                m.acwr, m.tsb
            ),
            "Keep progressing load by no more than 10% per week with one easy day after each hard one.",
            BUILD_CONFIDENCE,
            *m,
        )
    })
}

#[allow(clippy::unnecessary_wraps)]
fn base(m: &PhaseMetrics) -> Option<TrainingPhase> {
    Some(base_phase(*m))
}

fn base_phase(m: PhaseMetrics) -> TrainingPhase {
    phase(
        PhaseKind::Base,
        "Base building",
        format!("CTL {:.0} with ACWR {:.2}. Building the aerobic foundation.", m.ctl, m.acwr),
        "Mostly Z2 volume, increase duration gradually, one short session with strides.",
        BASE_CONFIDENCE,
        m,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use morphy_core::models::AthleteProfile;

    fn state(atl: f64, ctl: f64) -> AthleteState {
        let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut state = AthleteState::neutral(as_of, AthleteProfile::default().resolve());
        state.acute_load = atl;
        state.chronic_load = ctl;
        state.training_stress_balance = ctl - atl;
        state.acwr = if ctl > 0.0 { atl / ctl } else { 0.0 };
        state
    }

    fn aggregates(compliance: f64) -> ComplianceAggregates {
        ComplianceAggregates {
            compliance_7d: compliance,
            ..ComplianceAggregates::default()
        }
    }

    #[test]
    fn test_deload_confidence_scales_with_fatigue() {
        let phase = detect_phase(&state(60.0, 30.0), &aggregates(80.0));
        assert_eq!(phase.phase, PhaseKind::Deload);
        assert!((phase.confidence - 0.95).abs() < 1e-9);
        assert!(phase.description.contains("TSB at -30.0"));
    }

    #[test]
    fn test_low_compliance_forces_deload() {
        let phase = detect_phase(&state(60.0, 62.0), &aggregates(20.0));
        assert_eq!(phase.phase, PhaseKind::Deload);
        assert!((phase.confidence - 0.72).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_compare_unrounded_compliance() {
        let near_peak = detect_phase(&state(60.0, 62.0), &aggregates(69.96));
        assert_ne!(near_peak.phase, PhaseKind::Peak);
        assert!((near_peak.metrics.compliance_7d - 70.0).abs() < 1e-9);

        let near_deload = detect_phase(&state(60.0, 62.0), &aggregates(34.96));
        assert_eq!(near_deload.phase, PhaseKind::Deload);
        assert!((near_deload.metrics.compliance_7d - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_build_base_cascade() {
        assert_eq!(
            detect_phase(&state(60.0, 62.0), &aggregates(75.0)).phase,
            PhaseKind::Peak
        );
        assert_eq!(
            detect_phase(&state(40.0, 32.0), &aggregates(60.0)).phase,
            PhaseKind::Build
        );
        assert_eq!(
            detect_phase(&state(0.0, 0.0), &ComplianceAggregates::default()).phase,
            PhaseKind::Base
        );
    }
}
