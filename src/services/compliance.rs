// ABOUTME: Compliance backfill service reconstructing recent days and upserting inferred feedback
// ABOUTME: Counts per-day failures instead of aborting the window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use morphy_core::models::{ActivityRecord, AthleteProfile};
use morphy_intelligence::compliance::{reconstruct_window, BackfillSummary, DayOutcome};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::store::FeedbackStore;

/// What caused a backfill run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackfillTrigger {
    /// Full activity sync
    Sync,
    /// Single-activity webhook
    Webhook,
}

impl BackfillTrigger {
    /// Days to reconstruct for this trigger
    #[must_use]
    pub const fn lookback_days(self, config: &ServiceConfig) -> u32 {
        match self {
            Self::Sync => config.sync_lookback_days,
            Self::Webhook => config.webhook_lookback_days,
        }
    }
}

/// Reconstruct the `lookback_days` days before `today` and upsert one inferred row per day
///
/// Days without any visible activity are skipped. A day whose reconstruction
/// or upsert fails is logged and counted in `errors`; the remaining days still
/// run.
///
/// Past decisions are rebuilt with the default thresholds, not the athlete's
/// learned `ThresholdProfile` multipliers. Inferred rows grade each day
/// against the standard cascade, so the learner never grades its own
/// adjustments.
pub async fn run_compliance_backfill<S>(
    store: &S,
    user_id: Uuid,
    activities: &[ActivityRecord],
    profile: &AthleteProfile,
    config: &ServiceConfig,
    today: NaiveDate,
    lookback_days: u32,
) -> BackfillSummary
where
    S: FeedbackStore + ?Sized,
{
    let reference = profile.resolve_with(config.default_max_hr, config.default_rest_hr);
    let outcomes = reconstruct_window(activities, reference, today, lookback_days, None);

    let mut summary = BackfillSummary {
        days_analyzed: lookback_days,
        ..BackfillSummary::default()
    };

    for outcome in outcomes {
        match outcome {
            DayOutcome::Inferred(day) => {
                let record = day.to_feedback();
                match store.upsert_auto_inferred(user_id, record).await {
                    Ok(upsert) => {
                        summary.inferred += 1;
                        info!(
                            %user_id,
                            date = %day.date,
                            action = %day.action,
                            zone = %day.verdict.zone,
                            followed = day.verdict.followed,
                            reason = %day.verdict.reason,
                            ?upsert,
                            "compliance inferred"
                        );
                    }
                    Err(e) => {
                        summary.errors += 1;
                        error!(
                            %user_id,
                            date = %day.date,
                            error = %e,
                            "failed to store inferred compliance"
                        );
                    }
                }
            }
            DayOutcome::Skipped { date } => {
                summary.skipped += 1;
                warn!(%user_id, %date, "no activity visible yet, day skipped");
            }
            DayOutcome::Failed { date, error } => {
                summary.errors += 1;
                error!(%user_id, %date, %error, "compliance reconstruction failed");
            }
        }
    }

    info!(
        %user_id,
        days_analyzed = summary.days_analyzed,
        inferred = summary.inferred,
        skipped = summary.skipped,
        errors = summary.errors,
        "compliance backfill finished"
    );
    summary
}

/// Backfill with the lookback configured for a trigger
pub async fn backfill_for_trigger<S>(
    store: &S,
    user_id: Uuid,
    activities: &[ActivityRecord],
    profile: &AthleteProfile,
    config: &ServiceConfig,
    today: NaiveDate,
    trigger: BackfillTrigger,
) -> BackfillSummary
where
    S: FeedbackStore + ?Sized,
{
    run_compliance_backfill(
        store,
        user_id,
        activities,
        profile,
        config,
        today,
        trigger.lookback_days(config),
    )
    .await
}
