// ABOUTME: Learning service running the threshold learner against stored feedback and profiles
// ABOUTME: Also serves learning status, learning speed configuration and profile reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use morphy_core::errors::AppResult;
use morphy_core::models::{LearningSpeed, ThresholdProfile};
use morphy_intelligence::config::LearningConfig;
use morphy_intelligence::learning::{self, AdjustmentReport, AdjustmentStatus, LearningStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::store::{FeedbackStore, ThresholdStore};

/// Run the learner for one athlete and persist the adjusted profile
///
/// The profile guard is held from load to save so concurrent runs for the
/// same athlete cannot overwrite each other.
///
/// # Errors
///
/// Returns an error if the profile or feedback cannot be loaded or saved.
pub async fn analyze_and_adjust<S>(
    store: &S,
    user_id: Uuid,
    config: &ServiceConfig,
    now: DateTime<Utc>,
) -> AppResult<AdjustmentReport>
where
    S: FeedbackStore + ThresholdStore + ?Sized,
{
    let _guard = store.lock_profile(user_id).await?;
    let profile = store.get_or_create_profile(user_id).await?;
    let feedback = store
        .recent_feedback(user_id, config.feedback_window)
        .await?;

    let outcome = learning::analyze_and_adjust(&feedback, &profile, now);
    if outcome.report.status == AdjustmentStatus::NoFeedback {
        debug!(%user_id, "no feedback yet, thresholds unchanged");
        return Ok(outcome.report);
    }

    store.save_profile(user_id, &outcome.profile).await?;
    for adjustment in &outcome.report.adjustments {
        info!(
            %user_id,
            threshold = %adjustment.threshold,
            old = adjustment.old_value,
            new = adjustment.new_value,
            reason = %adjustment.reason,
            "threshold adjusted"
        );
    }
    Ok(outcome.report)
}

/// Learning status for one athlete
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub async fn learning_status<S>(store: &S, user_id: Uuid) -> AppResult<LearningStatus>
where
    S: ThresholdStore + ?Sized,
{
    let profile = store.get_or_create_profile(user_id).await?;
    Ok(learning::learning_status(&profile))
}

/// Result of changing the learning speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningConfigUpdate {
    /// Stored speed
    pub learning_speed: LearningSpeed,
    /// Stored custom count, present only for the custom tier
    pub custom_min_signals: Option<u32>,
    /// Human-readable description of the tier
    pub message: String,
}

/// Validate and store a new learning speed
///
/// # Errors
///
/// Returns `ConfigInvalid` for an invalid configuration, or a storage error.
pub async fn configure_learning<S>(
    store: &S,
    user_id: Uuid,
    learning_config: LearningConfig,
) -> AppResult<LearningConfigUpdate>
where
    S: ThresholdStore + ?Sized,
{
    learning_config.validate()?;

    let _guard = store.lock_profile(user_id).await?;
    let mut profile = store.get_or_create_profile(user_id).await?;
    learning_config.apply_to(&mut profile);
    store.save_profile(user_id, &profile).await?;

    info!(%user_id, speed = %profile.learning_speed, "learning speed updated");
    Ok(LearningConfigUpdate {
        learning_speed: profile.learning_speed,
        custom_min_signals: profile.custom_min_signals,
        message: learning_config.describe(),
    })
}

/// Put all multipliers back to neutral and clear the counters
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or saved.
pub async fn reset_learning<S>(store: &S, user_id: Uuid) -> AppResult<ThresholdProfile>
where
    S: ThresholdStore + ?Sized,
{
    let _guard = store.lock_profile(user_id).await?;
    let mut profile = store.get_or_create_profile(user_id).await?;
    profile.reset();
    store.save_profile(user_id, &profile).await?;
    info!(%user_id, "learning reset to neutral thresholds");
    Ok(profile)
}
