// ABOUTME: Integration tests for the adaptive threshold learner and its service
// ABOUTME: Covers category adjustments, multiplier bounds, status, speed configuration and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Utc;
use common::{feedback_rows, init_test_logging};
use morphy::config::{LearningConfig, ServiceConfig};
use morphy::services::learning::{
    analyze_and_adjust, configure_learning, learning_status, reset_learning,
};
use morphy::store::{FeedbackStore, InMemoryStore, ThresholdStore};
use morphy::ErrorCode;
use morphy_core::models::{LearningSpeed, ThresholdKind, TrainingAction};
use morphy_intelligence::learning::{AdjustmentDirection, AdjustmentStatus, ThresholdTendency};
use uuid::Uuid;

async fn seed(
    store: &InMemoryStore,
    user_id: Uuid,
    action: TrainingAction,
    followed: usize,
    ignored: usize,
) {
    for row in feedback_rows(action, followed, ignored) {
        store.append_feedback(user_id, row).await.unwrap();
    }
}

#[tokio::test]
async fn test_ignored_reduce_signals_raise_caution_threshold() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    seed(&store, user_id, TrainingAction::Easy, 1, 5).await;

    let report = analyze_and_adjust(&store, user_id, &ServiceConfig::default(), Utc::now()).await?;

    assert_eq!(report.status, AdjustmentStatus::Updated);
    assert_eq!(report.total_signals, 6);
    assert_eq!(report.min_signals_required, 5);
    assert!(report.learning_active);
    assert_eq!(report.adjustments.len(), 1);
    let adjustment = &report.adjustments[0];
    assert_eq!(adjustment.threshold, ThresholdKind::AcwrCaution);
    assert_eq!(adjustment.direction, AdjustmentDirection::IncreasedTolerance);
    assert!((adjustment.new_value - 1.03).abs() < 1e-9);

    let profile = store.get_or_create_profile(user_id).await?;
    assert!((profile.multiplier(ThresholdKind::AcwrCaution) - 1.03).abs() < 1e-9);
    assert!((profile.multiplier(ThresholdKind::AcwrDanger) - 1.0).abs() < 1e-9);
    assert_eq!(profile.counters.reduce.ignored, 5);
    assert_eq!(profile.total_feedbacks_analyzed, 6);
    assert!(profile.last_analyzed_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_no_feedback_leaves_profile_untouched() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();

    let report = analyze_and_adjust(&store, user_id, &ServiceConfig::default(), Utc::now()).await?;

    assert_eq!(report.status, AdjustmentStatus::NoFeedback);
    assert!(!report.learning_active);
    let profile = store.get_or_create_profile(user_id).await?;
    assert!(profile.last_analyzed_at.is_none());
    Ok(())
}

#[tokio::test]
async fn test_multipliers_stay_bounded_over_many_runs() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let ignorer = Uuid::new_v4();
    let follower = Uuid::new_v4();
    seed(&store, ignorer, TrainingAction::ActiveRecovery, 0, 20).await;
    seed(&store, follower, TrainingAction::Quality, 20, 0).await;
    let config = ServiceConfig::default();

    for _ in 0..40 {
        analyze_and_adjust(&store, ignorer, &config, Utc::now()).await?;
        analyze_and_adjust(&store, follower, &config, Utc::now()).await?;

        for user_id in [ignorer, follower] {
            let profile = store.get_or_create_profile(user_id).await?;
            for kind in ThresholdKind::ALL {
                let value = profile.multiplier(kind);
                assert!((0.7..=1.3).contains(&value), "{kind} at {value}");
            }
        }
    }

    let ignored = store.get_or_create_profile(ignorer).await?;
    assert!((ignored.multiplier(ThresholdKind::AcwrDanger) - 1.3).abs() < 1e-9);
    let followed = store.get_or_create_profile(follower).await?;
    assert!((followed.multiplier(ThresholdKind::TsbReduce) - 0.7).abs() < 1e-9);

    // a saturated multiplier is not reported as moving
    let report = analyze_and_adjust(&store, ignorer, &config, Utc::now()).await?;
    assert!(report
        .adjustments
        .iter()
        .all(|a| a.threshold != ThresholdKind::AcwrDanger));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_runs_do_not_lose_updates() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    seed(&store, user_id, TrainingAction::Easy, 1, 5).await;
    let config = ServiceConfig::default();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let store = store.clone();
            let config = config.clone();
            tokio::spawn(
                async move { analyze_and_adjust(&store, user_id, &config, Utc::now()).await },
            )
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let profile = store.get_or_create_profile(user_id).await?;
    assert!((profile.multiplier(ThresholdKind::AcwrCaution) - 1.06).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_status_reports_progress() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    seed(&store, user_id, TrainingAction::Easy, 1, 5).await;
    analyze_and_adjust(&store, user_id, &ServiceConfig::default(), Utc::now()).await?;

    let status = learning_status(&store, user_id).await?;

    assert!(status.learning_active);
    assert_eq!(status.learning_speed, LearningSpeed::Moderate);
    assert_eq!(status.total_analyzed, 6);
    assert_eq!(status.personalization_score, 40);
    assert_eq!(status.signals.reduce.total(), 6);
    assert!((status.effective_thresholds.acwr_caution - 1.3 * 1.03).abs() < 1e-9);
    // a single step stays under the drift tolerance
    assert!(status.adjusted_thresholds.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_status_lists_thresholds_that_drifted() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    seed(&store, user_id, TrainingAction::Easy, 1, 5).await;
    for _ in 0..3 {
        analyze_and_adjust(&store, user_id, &ServiceConfig::default(), Utc::now()).await?;
    }

    let status = learning_status(&store, user_id).await?;
    assert_eq!(status.adjusted_thresholds.len(), 1);
    let drifted = &status.adjusted_thresholds[0];
    assert_eq!(drifted.threshold, ThresholdKind::AcwrCaution);
    assert_eq!(drifted.tendency, ThresholdTendency::MoreTolerant);
    assert!((drifted.multiplier - 1.09).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_configure_learning_speed() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();

    let update = configure_learning(&store, user_id, LearningConfig::parse("custom", Some(3))?).await?;
    assert_eq!(update.learning_speed, LearningSpeed::Custom);
    assert_eq!(update.custom_min_signals, Some(3));
    assert_eq!(update.message, "Custom: learns after 3+ signals");
    assert_eq!(store.get_or_create_profile(user_id).await?.min_signals(), 3);

    let update = configure_learning(&store, user_id, LearningConfig::parse("fast", Some(7))?).await?;
    assert_eq!(update.custom_min_signals, None);
    assert_eq!(store.get_or_create_profile(user_id).await?.min_signals(), 3);

    let invalid = LearningConfig {
        speed: LearningSpeed::Custom,
        custom_min_signals: Some(80),
    };
    let error = configure_learning(&store, user_id, invalid).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(LearningConfig::parse("turbo", None).is_err());
    Ok(())
}

#[tokio::test]
async fn test_reset_restores_neutral_profile() -> Result<()> {
    init_test_logging();
    let store = InMemoryStore::with_default_speed(LearningSpeed::Fast);
    let user_id = Uuid::new_v4();
    seed(&store, user_id, TrainingAction::ActiveRecovery, 0, 6).await;
    analyze_and_adjust(&store, user_id, &ServiceConfig::default(), Utc::now()).await?;
    assert!(store.get_or_create_profile(user_id).await?.multiplier(ThresholdKind::AcwrDanger) > 1.0);

    let profile = reset_learning(&store, user_id).await?;

    for kind in ThresholdKind::ALL {
        assert!((profile.multiplier(kind) - 1.0).abs() < f64::EPSILON);
    }
    assert_eq!(profile.total_feedbacks_analyzed, 0);
    assert_eq!(profile.learning_speed, LearningSpeed::Fast);
    assert_eq!(store.get_or_create_profile(user_id).await?, profile);
    Ok(())
}
