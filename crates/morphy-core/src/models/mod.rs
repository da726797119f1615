// ABOUTME: Core data models for the Morphy training decision engine
// ABOUTME: Re-exports activity, athlete, action, feedback and threshold types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data shared by the algorithms and the service layer. None of these
//! types perform I/O.

/// Activity records and their builder
pub mod activity;
/// Training actions, their classes and detected zones
pub mod action;
/// Athlete heart-rate profile and resolved reference
pub mod athlete;
/// Recommendation feedback rows
pub mod feedback;
/// Personal threshold multipliers and learner counters
pub mod thresholds;

pub use action::{ActionClass, TrainingAction, TrainingZone};
pub use activity::{ActivityKind, ActivityRecord, ActivityRecordBuilder};
pub use athlete::{AthleteProfile, HeartRateReference, HrPrecision};
pub use feedback::{FeedbackRecord, FeedbackSource, InferenceDetails, MetricsSnapshot};
pub use thresholds::{
    clamp_multiplier, LearningSpeed, SignalCounters, SignalTally, ThresholdKind, ThresholdProfile,
};
