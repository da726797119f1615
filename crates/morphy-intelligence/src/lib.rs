// ABOUTME: Training decision intelligence: load estimation, decisions, compliance and learning
// ABOUTME: Pure computation over materialized inputs with no storage or network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Morphy Intelligence
//!
//! Deterministic algorithms behind the daily training decision. Every entry
//! point takes fully materialized inputs and returns plain data; persistence
//! and scheduling live in the `morphy` service crate.
//!
//! ## Modules
//!
//! - **training_load**: ATL, CTL, TSB, ACWR, readiness and injury risk
//! - **decision_engine**: rule cascade from athlete state to today's action
//! - **compliance**: per-day reconstruction and compliance inference
//! - **learning**: personal threshold multipliers learned from feedback
//! - **periodization**: training phase detection

/// Load models and heart-rate zone maths
pub mod algorithms;
/// Day-by-day reconstruction and compliance inference
pub mod compliance;
/// Threshold and learning configuration
pub mod config;
/// Rule cascade producing the daily decision
pub mod decision_engine;
/// Adaptive threshold learner
pub mod learning;
/// Training phase detection
pub mod periodization;
/// Physiological constants with their literature sources
pub mod physiological_constants;
/// Workout prescriptions and tips
pub mod prescriptions;
/// Athlete state estimation
pub mod training_load;

pub use compliance::{
    infer_compliance, reconstruct_day, reconstruct_window, ActivitySummary, BackfillSummary,
    ComplianceVerdict, DayOutcome, DayReconstruction,
};
pub use config::{ConfigError, DecisionThresholds, LearningConfig};
pub use decision_engine::{generate_decision, Decision, DecisionRule, PerceivedEffort};
pub use learning::{
    analyze_and_adjust, learning_status, AdjustmentReport, AdjustmentStatus, LearningOutcome,
    LearningStatus,
};
pub use periodization::{detect_phase, ComplianceAggregates, PhaseKind, TrainingPhase};
pub use training_load::{estimate_state, AthleteState, InjuryRisk, TrainingLoadEstimator};
