// ABOUTME: Training phase service aggregating stored compliance before running the phase detector
// ABOUTME: Uses the last seven days of auto-inferred feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Duration;
use morphy_core::constants::compliance::PHASE_WINDOW_DAYS;
use morphy_core::errors::AppResult;
use morphy_intelligence::periodization::{detect_phase, ComplianceAggregates, TrainingPhase};
use morphy_intelligence::training_load::AthleteState;
use tracing::debug;
use uuid::Uuid;

use crate::store::FeedbackStore;

/// Detect the current phase from a state and the athlete's stored compliance
///
/// # Errors
///
/// Returns an error if feedback cannot be loaded.
pub async fn current_phase<S>(
    store: &S,
    user_id: Uuid,
    state: &AthleteState,
) -> AppResult<TrainingPhase>
where
    S: FeedbackStore + ?Sized,
{
    let from = state.as_of - Duration::days(PHASE_WINDOW_DAYS);
    let records = store.feedback_since(user_id, from).await?;
    let aggregates = ComplianceAggregates::from_feedback(&records, state.as_of);
    let phase = detect_phase(state, &aggregates);
    debug!(
        %user_id,
        phase = %phase.phase,
        confidence = phase.confidence,
        compliance_7d = phase.metrics.compliance_7d,
        "training phase detected"
    );
    Ok(phase)
}
