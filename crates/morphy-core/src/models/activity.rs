// ABOUTME: Activity record model consumed by the training load estimator and compliance inference
// ABOUTME: Immutable ActivityRecord with accessor methods, a builder and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Activity categories that carry their own load weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Running
    Run,
    /// Cycling
    Ride,
    /// Swimming
    Swim,
    /// Strength or weight training
    WeightTraining,
    /// Walking
    Walk,
    /// Hiking
    Hike,
    /// Anything the provider reports that is not listed above
    Other,
}

impl ActivityKind {
    /// Map a provider activity type name to a kind
    ///
    /// Matching ignores case and the separators providers put between words,
    /// so `"WeightTraining"`, `"weight_training"` and `"Weight Training"` agree.
    #[must_use]
    pub fn from_provider_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "run" | "trailrun" | "virtualrun" => Self::Run,
            "ride" | "virtualride" | "ebikeride" | "cycling" => Self::Ride,
            "swim" | "swimming" => Self::Swim,
            "weighttraining" | "strength" | "strengthtraining" => Self::WeightTraining,
            "walk" | "walking" => Self::Walk,
            "hike" | "hiking" => Self::Hike,
            _ => Self::Other,
        }
    }
}

/// A completed workout as reported by a fitness provider
///
/// Fields are private; read them through accessors and construct records with
/// [`ActivityRecordBuilder`]. Distances are kilometres, durations minutes,
/// elevation metres and speed metres per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    start_date: DateTime<Utc>,
    activity_type: String,
    duration_minutes: f64,
    distance_km: f64,
    elevation_gain_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_heart_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_heart_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_speed: Option<f64>,
}

impl ActivityRecord {
    /// When the activity started (UTC)
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Provider activity type name
    #[must_use]
    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }

    /// Activity kind derived from the provider type name
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        ActivityKind::from_provider_name(&self.activity_type)
    }

    /// Moving duration in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    /// Distance in kilometres
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Total elevation gain in metres
    #[must_use]
    pub const fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    /// Average heart rate in bpm, if recorded
    #[must_use]
    pub const fn average_heart_rate(&self) -> Option<u32> {
        self.average_heart_rate
    }

    /// Maximum heart rate in bpm, if recorded
    #[must_use]
    pub const fn max_heart_rate(&self) -> Option<u32> {
        self.max_heart_rate
    }

    /// Average speed in metres per second, if recorded
    #[must_use]
    pub const fn average_speed(&self) -> Option<f64> {
        self.average_speed
    }

    /// Average heart rate when it is usable for intensity calculations
    #[must_use]
    pub fn usable_heart_rate(&self) -> Option<f64> {
        self.average_heart_rate
            .filter(|hr| *hr > 0)
            .map(f64::from)
    }

    /// Average pace in minutes per kilometre, derived from average speed
    ///
    /// `None` unless both a positive speed and a positive distance are known.
    #[must_use]
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.average_speed {
            Some(speed) if speed > 0.0 && self.distance_km > 0.0 => Some(1000.0 / (speed * 60.0)),
            _ => None,
        }
    }

    /// Reject records whose numeric fields cannot describe a real workout
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a numeric field is negative, NaN or infinite.
    pub fn validate(&self) -> AppResult<()> {
        check_non_negative("duration_minutes", self.duration_minutes)?;
        check_non_negative("distance_km", self.distance_km)?;
        check_non_negative("elevation_gain_m", self.elevation_gain_m)?;
        if let Some(speed) = self.average_speed {
            check_non_negative("average_speed", speed)?;
        }
        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "activity field {field} must be a finite non-negative number, got {value}"
        )))
    }
}

/// Builder for [`ActivityRecord`]
#[derive(Debug, Clone)]
pub struct ActivityRecordBuilder {
    record: ActivityRecord,
}

impl ActivityRecordBuilder {
    /// Start a builder with the required fields
    #[must_use]
    pub fn new(
        start_date: DateTime<Utc>,
        activity_type: impl Into<String>,
        duration_minutes: f64,
    ) -> Self {
        Self {
            record: ActivityRecord {
                start_date,
                activity_type: activity_type.into(),
                duration_minutes,
                distance_km: 0.0,
                elevation_gain_m: 0.0,
                average_heart_rate: None,
                max_heart_rate: None,
                average_speed: None,
            },
        }
    }

    /// Set the distance in kilometres
    #[must_use]
    pub const fn distance_km(mut self, distance_km: f64) -> Self {
        self.record.distance_km = distance_km;
        self
    }

    /// Set the elevation gain in metres
    #[must_use]
    pub const fn elevation_gain_m(mut self, elevation_gain_m: f64) -> Self {
        self.record.elevation_gain_m = elevation_gain_m;
        self
    }

    /// Set the average heart rate in bpm
    #[must_use]
    pub const fn average_heart_rate(mut self, bpm: u32) -> Self {
        self.record.average_heart_rate = Some(bpm);
        self
    }

    /// Set the maximum heart rate in bpm
    #[must_use]
    pub const fn max_heart_rate(mut self, bpm: u32) -> Self {
        self.record.max_heart_rate = Some(bpm);
        self
    }

    /// Set the average speed in metres per second
    #[must_use]
    pub const fn average_speed(mut self, metres_per_second: f64) -> Self {
        self.record.average_speed = Some(metres_per_second);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> ActivityRecord {
        self.record
    }

    /// Finish building and validate the result
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when any numeric field is out of range.
    pub fn try_build(self) -> AppResult<ActivityRecord> {
        self.record.validate()?;
        Ok(self.record)
    }
}
