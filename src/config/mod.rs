// ABOUTME: Configuration module for the Morphy service layer
// ABOUTME: Re-exports environment-driven service settings and the learning configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the Morphy service layer
//!
//! - **Environment**: lookback windows and population defaults from `MORPHY_*` variables
//! - **Learning**: validated learning speed settings, defined in the intelligence crate

/// Environment-driven service configuration
pub mod environment;

pub use environment::ServiceConfig;
pub use morphy_intelligence::config::{ConfigError, DecisionThresholds, LearningConfig};
