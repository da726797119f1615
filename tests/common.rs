// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, activity builders and feedback helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `morphy`

use std::env;
use std::sync::Once;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use morphy_core::models::{
    ActivityRecord, ActivityRecordBuilder, AthleteProfile, FeedbackRecord, MetricsSnapshot,
    TrainingAction,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Athlete with max 190 and rest 60
pub fn athlete() -> AthleteProfile {
    AthleteProfile::new(190, 60)
}

/// Fixed anchor day used across tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

/// Instant `days_ago` days before `today()` at the given hour
pub fn at(days_ago: i64, hour: u32) -> DateTime<Utc> {
    (today() - Duration::days(days_ago))
        .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
        .and_utc()
}

/// Run with heart rate
pub fn run(start: DateTime<Utc>, minutes: f64, avg_hr: u32) -> ActivityRecord {
    ActivityRecordBuilder::new(start, "Run", minutes)
        .distance_km(minutes / 6.0)
        .average_heart_rate(avg_hr)
        .build()
}

/// Run without heart rate at a given pace in m/s
pub fn run_without_hr(start: DateTime<Utc>, minutes: f64, speed: f64) -> ActivityRecord {
    ActivityRecordBuilder::new(start, "Run", minutes)
        .distance_km(speed * minutes * 60.0 / 1000.0)
        .average_speed(speed)
        .build()
}

/// One 45-minute run per day for `days` days ending yesterday
pub fn daily_runs(days: i64, avg_hr: u32) -> Vec<ActivityRecord> {
    (1..=days).map(|d| run(at(d, 7), 45.0, avg_hr)).collect()
}

/// Manual feedback rows, newest first, one hour apart
pub fn feedback_rows(action: TrainingAction, followed: usize, ignored: usize) -> Vec<FeedbackRecord> {
    let now = Utc::now();
    (0..followed + ignored)
        .map(|i| {
            FeedbackRecord::manual(action, i >= ignored, MetricsSnapshot::default())
                .with_date(now - Duration::hours(i64::try_from(i).unwrap()))
        })
        .collect()
}
