// ABOUTME: Integration tests for the daily decision rule cascade
// ABOUTME: Covers determinism, insufficient data, rule priority, personal thresholds and effort
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{at, athlete, daily_runs, today};
use morphy_core::models::{AthleteProfile, ThresholdKind, ThresholdProfile, TrainingAction};
use morphy_intelligence::decision_engine::{generate_decision, DecisionRule, PerceivedEffort};
use morphy_intelligence::training_load::{estimate_state_at, AthleteState, InjuryRisk};

fn state(acwr: f64, tsb: f64, ctl: f64) -> AthleteState {
    AthleteState {
        acute_load: ctl - tsb,
        chronic_load: ctl,
        training_stress_balance: tsb,
        acwr,
        readiness_score: 70.0,
        injury_risk: InjuryRisk::from_acwr(acwr),
        activity_count: 20,
        days_since_last: Some(1),
        has_heart_rate_data: true,
        ..AthleteState::neutral(today(), athlete().resolve())
    }
}

#[test]
fn test_decision_is_deterministic() {
    let current = estimate_state_at(&daily_runs(21, 150), &athlete(), at(0, 12));
    let first = generate_decision(&current, None, None);
    let second = generate_decision(&current, None, None);
    assert_eq!(first, second);
}

#[test]
fn test_too_few_activities_gives_starter_decision() {
    let current = estimate_state_at(&daily_runs(2, 150), &athlete(), at(0, 12));
    let decision = generate_decision(&current, None, None);

    assert_eq!(decision.rule, DecisionRule::InsufficientData);
    assert_eq!(decision.action, TrainingAction::Moderate);
    assert!((decision.confidence - 0.3).abs() < f64::EPSILON);
    assert!(decision.reasoning.contains("Only 2 activities"));
    assert!(decision.risk_note.is_none());
}

#[test]
fn test_load_spike_recommends_active_recovery() {
    let current = estimate_state_at(&daily_runs(10, 160), &athlete(), at(0, 12));
    let decision = generate_decision(&current, None, None);

    assert_eq!(decision.rule, DecisionRule::InjuryRisk);
    assert_eq!(decision.action, TrainingAction::ActiveRecovery);
    assert!(decision.risk_note.is_some());
    assert!((0.85..=0.95).contains(&decision.confidence));
}

#[test]
fn test_rule_priority_follows_severity() {
    let cases = [
        (state(1.6, -30.0, 40.0), DecisionRule::InjuryRisk),
        (state(1.4, -30.0, 40.0), DecisionRule::ElevatedLoad),
        (state(1.0, -20.0, 40.0), DecisionRule::AccumulatedFatigue),
        (state(1.0, 15.0, 40.0), DecisionRule::FreshAndFit),
        (state(1.0, 0.0, 40.0), DecisionRule::Balanced),
    ];
    for (current, expected) in cases {
        let decision = generate_decision(&current, None, None);
        assert_eq!(decision.rule, expected, "acwr {}", current.acwr);
        assert_eq!(decision.action, expected.action());
    }
}

#[test]
fn test_long_break_suggests_comeback() {
    let current = AthleteState {
        days_since_last: Some(6),
        ..state(1.0, 0.0, 20.0)
    };
    let decision = generate_decision(&current, None, None);
    assert_eq!(decision.rule, DecisionRule::ReturnFromBreak);
    assert_eq!(decision.action, TrainingAction::Comeback);
}

#[test]
fn test_personal_thresholds_shift_the_rule() {
    let loaded = state(1.25, 0.0, 40.0);
    assert_eq!(generate_decision(&loaded, None, None).rule, DecisionRule::Balanced);

    let mut strict = ThresholdProfile::default();
    strict.set_multiplier(ThresholdKind::AcwrCaution, 0.9);
    let decision = generate_decision(&loaded, Some(&strict), None);
    assert_eq!(decision.rule, DecisionRule::ElevatedLoad);
    assert!((decision.thresholds.acwr_caution - 1.17).abs() < 1e-9);
    assert!(decision.reasoning.contains("caution threshold of 1.17"));

    let tired = state(1.0, -16.0, 40.0);
    assert_eq!(
        generate_decision(&tired, None, None).rule,
        DecisionRule::AccumulatedFatigue
    );
    let mut tolerant = ThresholdProfile::default();
    tolerant.set_multiplier(ThresholdKind::TsbRest, 1.3);
    assert_eq!(
        generate_decision(&tired, Some(&tolerant), None).rule,
        DecisionRule::Balanced
    );
}

#[test]
fn test_high_risk_state_ignores_raised_multipliers() {
    let current = state(1.6, -18.0, 40.0);
    assert_eq!(current.injury_risk, InjuryRisk::High);

    let mut profile = ThresholdProfile::default();
    profile.set_multiplier(ThresholdKind::AcwrDanger, 1.3);
    profile.set_multiplier(ThresholdKind::AcwrCaution, 1.3);
    let decision = generate_decision(&current, Some(&profile), None);

    assert_eq!(decision.rule, DecisionRule::InjuryRisk);
    assert_eq!(decision.action, TrainingAction::ActiveRecovery);
    assert!(decision.reasoning.contains("standard risk band edge of 1.5"));
    assert!((0.85..=0.95).contains(&decision.confidence));
}

#[test]
fn test_precision_hint_only_with_default_heart_rates() {
    let activities = daily_runs(21, 150);

    let measured = estimate_state_at(&activities, &athlete(), at(0, 12));
    assert!(generate_decision(&measured, None, None).precision_hint.is_none());

    let defaults = estimate_state_at(&activities, &AthleteProfile::default(), at(0, 12));
    let decision = generate_decision(&defaults, None, None);
    let hint = decision.precision_hint.as_deref().unwrap();
    assert!(hint.contains("population defaults"));
    assert!(decision.reasoning.contains(hint));
}

#[test]
fn test_high_effort_lowers_confidence() {
    let current = state(1.0, 0.0, 40.0);
    let plain = generate_decision(&current, None, None);
    let tired = generate_decision(&current, None, Some(PerceivedEffort::new(9).unwrap()));
    let easy = generate_decision(&current, None, Some(PerceivedEffort::new(4).unwrap()));

    assert!((plain.confidence - tired.confidence - 0.05).abs() < 1e-9);
    assert!(tired.reasoning.contains("9/10"));
    assert_eq!(plain, easy);
}

#[test]
fn test_decision_serializes_to_snake_case() {
    let decision = generate_decision(&state(1.6, -30.0, 40.0), None, None);
    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["rule"], "injury_risk");
    assert!(json.get("precision_hint").is_none());
}
