// ABOUTME: Learning speed configuration and its validation rules
// ABOUTME: Rejects unknown tiers and custom signal counts outside 1-50 before they reach the learner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use morphy_core::constants::learning::{CUSTOM_MIN_SIGNALS_LOWER, CUSTOM_MIN_SIGNALS_UPPER};
use morphy_core::models::{LearningSpeed, ThresholdProfile};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Validated learning speed settings for one athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Learning speed tier
    pub speed: LearningSpeed,
    /// Signal count for the custom tier
    pub custom_min_signals: Option<u32>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            speed: LearningSpeed::Moderate,
            custom_min_signals: None,
        }
    }
}

impl LearningConfig {
    /// Build from raw request values and validate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for an unknown tier and
    /// `ConfigError::InvalidRange` for a custom count outside 1-50.
    pub fn parse(speed: &str, custom_min_signals: Option<u32>) -> Result<Self, ConfigError> {
        let speed = speed
            .parse::<LearningSpeed>()
            .map_err(|e| ConfigError::Parse(e.message))?;
        let config = Self {
            speed,
            custom_min_signals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the custom count range
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when a custom count is outside 1-50,
    /// or `ConfigError::MissingField` when the custom tier has no count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.speed, self.custom_min_signals) {
            (LearningSpeed::Custom, None) => Err(ConfigError::MissingField("custom_min_signals")),
            (_, Some(count))
                if !(CUSTOM_MIN_SIGNALS_LOWER..=CUSTOM_MIN_SIGNALS_UPPER).contains(&count) =>
            {
                Err(ConfigError::InvalidRange(
                    "custom_min_signals must be between 1 and 50",
                ))
            }
            _ => Ok(()),
        }
    }

    /// Human-readable summary of the evidence this tier needs
    #[must_use]
    pub fn describe(&self) -> String {
        match self.speed {
            LearningSpeed::Conservative => "Conservative: learns after 10+ signals".to_owned(),
            LearningSpeed::Moderate => "Moderate: learns after 5+ signals".to_owned(),
            LearningSpeed::Fast => "Fast: learns after 3+ signals".to_owned(),
            LearningSpeed::Custom => format!(
                "Custom: learns after {}+ signals",
                self.custom_min_signals.unwrap_or_default()
            ),
        }
    }

    /// Write these settings into a threshold profile
    ///
    /// The custom count is only kept for the custom tier.
    pub fn apply_to(&self, profile: &mut ThresholdProfile) {
        profile.learning_speed = self.speed;
        profile.custom_min_signals = match self.speed {
            LearningSpeed::Custom => self.custom_min_signals,
            _ => None,
        };
    }
}
