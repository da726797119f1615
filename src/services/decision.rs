// ABOUTME: Daily decision service combining recent activities with the athlete's learned thresholds
// ABOUTME: Filters activity history to the configured window before estimating the state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use morphy_core::errors::AppResult;
use morphy_core::models::{ActivityRecord, AthleteProfile};
use morphy_intelligence::decision_engine::{generate_decision, Decision, PerceivedEffort};
use morphy_intelligence::training_load::{AthleteState, TrainingLoadEstimator};
use serde::Serialize;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::store::ThresholdStore;

/// State and decision for today
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDecision {
    /// Estimated state
    pub state: AthleteState,
    /// Recommendation
    pub decision: Decision,
}

/// Estimate the athlete state over the configured activity window
#[must_use]
pub fn current_state(
    activities: &[ActivityRecord],
    profile: &AthleteProfile,
    config: &ServiceConfig,
    now: DateTime<Utc>,
) -> AthleteState {
    let cutoff = now - Duration::days(i64::from(config.activity_window_days));
    let recent: Vec<ActivityRecord> = activities
        .iter()
        .filter(|a| a.start_date() >= cutoff)
        .cloned()
        .collect();
    let reference = profile.resolve_with(config.default_max_hr, config.default_rest_hr);
    TrainingLoadEstimator::new().estimate_with_reference(&recent, reference, now.date_naive())
}

/// Today's decision using the athlete's stored threshold profile
///
/// # Errors
///
/// Returns an error if the threshold profile cannot be loaded.
pub async fn todays_decision<S>(
    store: &S,
    user_id: Uuid,
    activities: &[ActivityRecord],
    profile: &AthleteProfile,
    config: &ServiceConfig,
    perceived_effort: Option<PerceivedEffort>,
    now: DateTime<Utc>,
) -> AppResult<DailyDecision>
where
    S: ThresholdStore + ?Sized,
{
    let thresholds = store.get_or_create_profile(user_id).await?;
    let state = current_state(activities, profile, config, now);
    let decision = generate_decision(&state, Some(&thresholds), perceived_effort);
    Ok(DailyDecision { state, decision })
}
