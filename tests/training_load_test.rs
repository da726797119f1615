// ABOUTME: Integration tests for athlete state estimation from activity history
// ABOUTME: Covers empty history, Banister TRIMP, readiness bounds and look-ahead protection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{at, athlete, daily_runs, run, run_without_hr, today};
use morphy_core::models::AthleteProfile;
use morphy_intelligence::algorithms::trimp::{activity_load, LoadModel};
use morphy_intelligence::training_load::{estimate_state_at, InjuryRisk, TrainingLoadEstimator};

#[test]
fn test_empty_history_is_neutral() {
    let state = estimate_state_at(&[], &athlete(), at(0, 12));

    assert!(state.acute_load.abs() < f64::EPSILON);
    assert!(state.chronic_load.abs() < f64::EPSILON);
    assert!(state.acwr.abs() < f64::EPSILON);
    assert!((state.readiness_score - 100.0).abs() < f64::EPSILON);
    assert_eq!(state.injury_risk, InjuryRisk::Low);
    assert_eq!(state.activity_count, 0);
    assert_eq!(state.days_since_last_or_sentinel(), 999);
}

#[test]
fn test_banister_trimp_for_reference_session() {
    let session = run(at(0, 7), 45.0, 160);
    let reference = athlete().resolve();

    assert_eq!(LoadModel::for_activity(&session), LoadModel::HeartRateReserve);
    let load = activity_load(&session, &reference);
    assert!((load - 97.01).abs() < 0.1, "got {load}");

    // a single session today lands undecayed in both windows
    let state = estimate_state_at(&[session], &athlete(), at(0, 20));
    assert!((state.acute_load - load / 7.0).abs() < 1e-9);
    assert!((state.chronic_load - load / 42.0).abs() < 1e-9);
    assert!(state.has_heart_rate_data);
}

#[test]
fn test_sessions_without_heart_rate_use_estimated_load() {
    // 3.0 m/s is about 5.6 min/km
    let session = run_without_hr(at(1, 7), 50.0, 3.0);
    assert_eq!(LoadModel::for_activity(&session), LoadModel::Estimated);

    let state = estimate_state_at(&[session], &athlete(), at(0, 12));
    assert!(state.acute_load > 0.0);
    assert!(!state.has_heart_rate_data);
}

#[test]
fn test_readiness_stays_in_bounds() {
    let scenarios = [
        Vec::new(),
        daily_runs(3, 150),
        daily_runs(10, 175),
        daily_runs(42, 140),
        vec![run(at(20, 7), 240.0, 185)],
    ];
    for activities in &scenarios {
        let state = estimate_state_at(activities, &athlete(), at(0, 12));
        assert!(
            (0.0..=100.0).contains(&state.readiness_score),
            "readiness {} out of range",
            state.readiness_score
        );
    }
}

#[test]
fn test_acwr_zero_without_chronic_load() {
    let empty = estimate_state_at(&[], &athlete(), at(0, 12));
    assert!(empty.chronic_load.abs() < f64::EPSILON);
    assert!(empty.acwr.abs() < f64::EPSILON);

    let loaded = estimate_state_at(&daily_runs(14, 150), &athlete(), at(0, 12));
    assert!(loaded.acwr > 0.0);
    assert!(loaded.chronic_load > 0.0);
}

#[test]
fn test_sudden_load_spike_is_high_risk() {
    let state = estimate_state_at(&daily_runs(10, 160), &athlete(), at(0, 12));

    assert!(state.acwr > 1.5, "acwr {}", state.acwr);
    assert_eq!(state.injury_risk, InjuryRisk::High);
    assert_eq!(state.days_since_last, Some(1));
    assert!(state.training_stress_balance < 0.0);
}

#[test]
fn test_future_activities_are_invisible() {
    let mut activities = daily_runs(7, 150);
    let before = estimate_state_at(&activities, &athlete(), at(3, 23));

    activities.push(run(at(2, 7), 90.0, 180));
    activities.push(run(at(0, 7), 90.0, 180));
    let after = estimate_state_at(&activities, &athlete(), at(3, 23));

    assert_eq!(before, after);
}

#[test]
fn test_load_grows_with_heart_rate() {
    let mut previous = 0.0;
    for avg_hr in [110, 130, 150, 170, 185] {
        let state = estimate_state_at(&[run(at(0, 7), 45.0, avg_hr)], &athlete(), at(0, 12));
        assert!(state.acute_load > previous, "hr {avg_hr}");
        previous = state.acute_load;
    }
}

#[test]
fn test_custom_windows_change_the_ratio() {
    let activities = daily_runs(20, 150);
    let profile = AthleteProfile::new(190, 60);
    let standard = TrainingLoadEstimator::new().estimate(&activities, &profile, at(0, 12));
    let short = TrainingLoadEstimator::with_windows(3, 21).estimate(&activities, &profile, at(0, 12));

    assert!((standard.acwr - short.acwr).abs() > 1e-6);
    assert_eq!(standard.as_of, today());
}
