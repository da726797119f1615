// ABOUTME: Integration tests for day reconstruction and compliance inference
// ABOUTME: Covers rest tolerance, main activity selection and the strict end-of-day cutoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{at, athlete, daily_runs, run, today};
use morphy_core::models::{
    ActionClass, ActivityRecord, ActivityRecordBuilder, TrainingAction, TrainingZone,
};
use morphy_intelligence::compliance::{
    day_start, infer_compliance, main_activity, reconstruct_day, reconstruct_window,
    ActivitySummary, DayOutcome,
};

fn sorted(mut activities: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
    activities.sort_by_key(ActivityRecord::start_date);
    activities
}

#[test]
fn test_short_easy_session_respects_rest() {
    let session = run(at(1, 8), 20.0, 135);
    let summary = ActivitySummary::from_activity(&session);
    let verdict = infer_compliance(
        TrainingAction::ActiveRecovery,
        Some(&summary),
        &athlete().resolve(),
    );

    assert!(verdict.followed);
    assert_eq!(verdict.zone, TrainingZone::Z1);
    assert!(verdict.reason.contains("respected"));
}

#[test]
fn test_missing_heart_rate_counts_as_no_activity() {
    let session = ActivityRecordBuilder::new(at(1, 8), "Ride", 60.0).build();
    let summary = ActivitySummary::from_activity(&session);
    let reference = athlete().resolve();

    let rest = infer_compliance(TrainingAction::ActiveRecovery, Some(&summary), &reference);
    assert!(rest.followed);
    assert_eq!(rest.zone, TrainingZone::None);

    let quality = infer_compliance(TrainingAction::Quality, Some(&summary), &reference);
    assert!(!quality.followed);
    assert!(quality.reason.contains("without heart-rate data"));
}

#[test]
fn test_comeback_day_needs_moderate_effort() {
    let reference = athlete().resolve();
    assert_eq!(TrainingAction::Comeback.class(), ActionClass::Increase);

    // (135 - 60) / 130 = 0.58 -> Z1
    let gentle = ActivitySummary::from_activity(&run(at(1, 8), 30.0, 135));
    let verdict = infer_compliance(TrainingAction::Comeback, Some(&gentle), &reference);
    assert!(!verdict.followed);
    assert_eq!(verdict.zone, TrainingZone::Z1);

    // (158 - 60) / 130 = 0.75 -> Z3
    let steady = ActivitySummary::from_activity(&run(at(1, 8), 40.0, 158));
    let verdict = infer_compliance(TrainingAction::Comeback, Some(&steady), &reference);
    assert!(verdict.followed);
    assert_eq!(verdict.zone, TrainingZone::Z3);

    assert!(!infer_compliance(TrainingAction::Comeback, None, &reference).followed);
}

#[test]
fn test_main_activity_is_longest_of_the_day() {
    let activities = vec![
        run(at(2, 7), 30.0, 140),
        run(at(2, 18), 55.0, 150),
        run(at(2, 12), 55.0, 170),
        run(at(1, 7), 120.0, 150),
    ];
    let day = today() - Duration::days(2);
    let main = main_activity(&activities, day).unwrap();

    // ties keep the first one in the slice
    assert_eq!(main.start_date(), at(2, 18));
    assert!(main_activity(&activities, today()).is_none());
}

#[test]
fn test_activity_at_midnight_belongs_to_next_day() {
    let base = daily_runs(10, 150);
    let day = today() - Duration::days(3);

    let mut with_midnight = base.clone();
    with_midnight.push(run(day_start(day + Duration::days(1)), 120.0, 180));
    let with_midnight = sorted(with_midnight);
    let base = sorted(base);

    let reference = athlete().resolve();
    let without = reconstruct_day(&base, reference, day, None).unwrap().unwrap();
    let with = reconstruct_day(&with_midnight, reference, day, None)
        .unwrap()
        .unwrap();

    assert_eq!(without, with);
    assert_eq!(with.state.activity_count, 8);
}

#[test]
fn test_window_skips_days_before_first_activity() {
    let activities = vec![run(at(2, 9), 45.0, 150)];
    let outcomes = reconstruct_window(&activities, athlete().resolve(), today(), 7, None);

    assert_eq!(outcomes.len(), 7);
    assert_eq!(outcomes[0].date(), today() - Duration::days(7));
    assert_eq!(outcomes[6].date(), today() - Duration::days(1));

    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, DayOutcome::Skipped { .. }))
        .count();
    assert_eq!(skipped, 5);

    let DayOutcome::Inferred(yesterday) = &outcomes[6] else {
        panic!("yesterday should be inferred");
    };
    assert!(yesterday.summary.is_none());
    assert_eq!(yesterday.rule.action(), yesterday.action);
}

#[test]
fn test_invalid_activity_fails_only_days_that_see_it() {
    let mut activities = daily_runs(3, 150);
    activities.push(ActivityRecordBuilder::new(at(2, 20), "Run", -5.0).build());
    let outcomes = reconstruct_window(&activities, athlete().resolve(), today(), 3, None);

    assert!(matches!(outcomes[0], DayOutcome::Inferred(_)));
    assert!(matches!(outcomes[1], DayOutcome::Failed { .. }));
    assert!(matches!(outcomes[2], DayOutcome::Failed { .. }));
}

#[test]
fn test_inferred_row_carries_metrics_and_details() {
    let activities = daily_runs(8, 150);
    let outcomes = reconstruct_window(&activities, athlete().resolve(), today(), 1, None);
    let DayOutcome::Inferred(day) = &outcomes[0] else {
        panic!("expected an inferred day");
    };

    let row = day.to_feedback();
    assert!(row.is_auto_inferred());
    assert_eq!(row.day(), today() - Duration::days(1));
    assert_eq!(row.metrics.acwr, Some(day.state.acwr));
    let details = row.inference.unwrap();
    assert_eq!(details.activity_avg_hr, Some(150.0));
    assert_eq!(details.activity_duration_min, Some(45.0));
    assert_eq!(details.detected_zone, day.verdict.zone);
}
