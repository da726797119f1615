// ABOUTME: Manual feedback submission and follow-rate statistics
// ABOUTME: Every submission is stored and immediately fed back into the threshold learner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use morphy_core::errors::AppResult;
use morphy_core::models::{FeedbackRecord, MetricsSnapshot, TrainingAction};
use morphy_intelligence::learning::AdjustmentReport;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::learning::analyze_and_adjust;
use crate::config::ServiceConfig;
use crate::store::{FeedbackStore, ThresholdStore};

/// Athlete-submitted feedback on one recommendation
///
/// `action` accepts the current action names and the legacy
/// `rest`/`reduce`/`maintain`/`increase` tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// Whether the recommendation was followed
    pub followed: bool,
    /// Recommended action
    pub action: TrainingAction,
    /// ACWR when the recommendation was made
    #[serde(default)]
    pub acwr: Option<f64>,
    /// Readiness when the recommendation was made
    #[serde(default)]
    pub readiness: Option<f64>,
    /// TSB when the recommendation was made
    #[serde(default)]
    pub tsb: Option<f64>,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
}

/// Stored row plus the learning run it triggered
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReceipt {
    /// Stored row
    pub record: FeedbackRecord,
    /// Learner report
    pub learning: AdjustmentReport,
}

/// Store manual feedback and re-run the learner
///
/// # Errors
///
/// Returns an error if the row cannot be stored or the learner cannot run.
pub async fn submit_feedback<S>(
    store: &S,
    user_id: Uuid,
    submission: FeedbackSubmission,
    config: &ServiceConfig,
    now: DateTime<Utc>,
) -> AppResult<FeedbackReceipt>
where
    S: FeedbackStore + ThresholdStore + ?Sized,
{
    let metrics = MetricsSnapshot {
        acwr: submission.acwr,
        tsb: submission.tsb,
        readiness: submission.readiness,
    };
    let mut record =
        FeedbackRecord::manual(submission.action, submission.followed, metrics).with_date(now);
    if let Some(note) = submission.note.filter(|n| !n.trim().is_empty()) {
        record = record.with_note(note);
    }

    store.append_feedback(user_id, record.clone()).await?;
    info!(
        %user_id,
        action = %record.action,
        followed = record.followed,
        "feedback recorded"
    );

    let learning = analyze_and_adjust(store, user_id, config, now).await?;
    Ok(FeedbackReceipt { record, learning })
}

/// Follow statistics over all stored feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    /// Rows stored
    pub total_decisions: u32,
    /// Rows followed
    pub followed: u32,
    /// Rows ignored
    pub ignored: u32,
    /// Followed share in percent, one decimal, 0 without rows
    pub follow_rate: f64,
}

impl FeedbackStats {
    /// Statistics over a set of rows
    #[must_use]
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let total = records.len() as u32;
        let followed = records.iter().filter(|r| r.followed).count() as u32;
        let follow_rate = if total == 0 {
            0.0
        } else {
            (f64::from(followed) / f64::from(total) * 1000.0).round() / 10.0
        };
        Self {
            total_decisions: total,
            followed,
            ignored: total - followed,
            follow_rate,
        }
    }
}

/// Follow statistics for one athlete
///
/// # Errors
///
/// Returns an error if feedback cannot be loaded.
pub async fn feedback_stats<S>(store: &S, user_id: Uuid) -> AppResult<FeedbackStats>
where
    S: FeedbackStore + ?Sized,
{
    let records = store.all_feedback(user_id).await?;
    Ok(FeedbackStats::from_records(&records))
}
