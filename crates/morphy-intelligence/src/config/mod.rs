// ABOUTME: Configuration module for morphy-intelligence
// ABOUTME: Re-exports threshold, learning and error configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration validation errors
pub mod error;
/// Learning speed configuration
pub mod learning;
/// Effective decision thresholds
pub mod thresholds;

pub use error::ConfigError;
pub use learning::LearningConfig;
pub use thresholds::DecisionThresholds;
