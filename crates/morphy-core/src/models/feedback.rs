// ABOUTME: Feedback rows recording whether the athlete followed a recommendation
// ABOUTME: Rows come from manual submissions or from automatic compliance inference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::{TrainingAction, TrainingZone};

/// Where a feedback row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    /// Submitted by the athlete
    Manual,
    /// Reconstructed from activity data
    AutoInferred,
}

/// Athlete metrics captured alongside a feedback row
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Acute to chronic workload ratio at the time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acwr: Option<f64>,
    /// Training stress balance at the time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsb: Option<f64>,
    /// Readiness score at the time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness: Option<f64>,
}

/// Details recorded when compliance was inferred automatically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceDetails {
    /// Average heart rate of the main activity, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_avg_hr: Option<f64>,
    /// Duration of the main activity in minutes, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_duration_min: Option<f64>,
    /// Zone the main activity fell into
    pub detected_zone: TrainingZone,
    /// Human-readable explanation of the verdict
    pub reason: String,
}

/// One recommendation outcome for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Row identifier
    pub id: Uuid,
    /// When the recommendation applied
    pub date: DateTime<Utc>,
    /// Recommended action
    pub action: TrainingAction,
    /// Whether the athlete followed it
    pub followed: bool,
    /// Metrics at the time
    #[serde(default)]
    pub metrics: MetricsSnapshot,
    /// Free-form note from the athlete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Origin of the row
    pub source: FeedbackSource,
    /// Present for auto-inferred rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<InferenceDetails>,
}

impl FeedbackRecord {
    /// Manual feedback row dated now
    #[must_use]
    pub fn manual(action: TrainingAction, followed: bool, metrics: MetricsSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            action,
            followed,
            metrics,
            note: None,
            source: FeedbackSource::Manual,
            inference: None,
        }
    }

    /// Auto-inferred row for a reconstructed day
    #[must_use]
    pub fn auto_inferred(
        date: DateTime<Utc>,
        action: TrainingAction,
        followed: bool,
        metrics: MetricsSnapshot,
        inference: InferenceDetails,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            action,
            followed,
            metrics,
            note: None,
            source: FeedbackSource::AutoInferred,
            inference: Some(inference),
        }
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Override the row date
    #[must_use]
    pub const fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Calendar day (UTC) the row belongs to
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Whether the row came from automatic inference
    #[must_use]
    pub fn is_auto_inferred(&self) -> bool {
        self.source == FeedbackSource::AutoInferred
    }
}
