// ABOUTME: Environment configuration for the Morphy service layer
// ABOUTME: Reads lookback windows, feedback window and population defaults from MORPHY_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use morphy_core::constants::compliance::{SYNC_LOOKBACK_DAYS, WEBHOOK_LOOKBACK_DAYS};
use morphy_core::constants::heart_rate::{DEFAULT_MAX_HR, DEFAULT_REST_HR};
use morphy_core::constants::learning::FEEDBACK_WINDOW;
use morphy_core::constants::windows::{ACTIVITY_HISTORY_DAYS, CHRONIC_DAYS};
use morphy_core::models::LearningSpeed;
use morphy_intelligence::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Runtime settings for the service layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Days reconstructed after a full activity sync
    pub sync_lookback_days: u32,
    /// Days reconstructed after a single-activity webhook
    pub webhook_lookback_days: u32,
    /// Days of activity history loaded for state estimation
    pub activity_window_days: u32,
    /// Feedback rows the learner inspects
    pub feedback_window: usize,
    /// Maximum heart rate assumed when the athlete has none
    pub default_max_hr: u32,
    /// Resting heart rate assumed when the athlete has none
    pub default_rest_hr: u32,
    /// Learning speed given to new threshold profiles
    pub default_learning_speed: LearningSpeed,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            sync_lookback_days: SYNC_LOOKBACK_DAYS,
            webhook_lookback_days: WEBHOOK_LOOKBACK_DAYS,
            activity_window_days: ACTIVITY_HISTORY_DAYS,
            feedback_window: FEEDBACK_WINDOW,
            default_max_hr: DEFAULT_MAX_HR,
            default_rest_hr: DEFAULT_REST_HR,
            default_learning_speed: LearningSpeed::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for values that do not parse and
    /// `ConfigError::ValueOutOfRange` when [`Self::validate`] rejects them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            sync_lookback_days: env_or("MORPHY_SYNC_LOOKBACK_DAYS", defaults.sync_lookback_days)?,
            webhook_lookback_days: env_or(
                "MORPHY_WEBHOOK_LOOKBACK_DAYS",
                defaults.webhook_lookback_days,
            )?,
            activity_window_days: env_or(
                "MORPHY_ACTIVITY_WINDOW_DAYS",
                defaults.activity_window_days,
            )?,
            feedback_window: env_or("MORPHY_FEEDBACK_WINDOW", defaults.feedback_window)?,
            default_max_hr: env_or("MORPHY_DEFAULT_MAX_HR", defaults.default_max_hr)?,
            default_rest_hr: env_or("MORPHY_DEFAULT_REST_HR", defaults.default_rest_hr)?,
            default_learning_speed: env_or(
                "MORPHY_DEFAULT_LEARNING_SPEED",
                defaults.default_learning_speed,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_lookback_days == 0 || self.sync_lookback_days > self.activity_window_days {
            return Err(ConfigError::ValueOutOfRange(
                "MORPHY_SYNC_LOOKBACK_DAYS must be between 1 and the activity window",
            ));
        }
        if self.webhook_lookback_days == 0
            || self.webhook_lookback_days > self.activity_window_days
        {
            return Err(ConfigError::ValueOutOfRange(
                "MORPHY_WEBHOOK_LOOKBACK_DAYS must be between 1 and the activity window",
            ));
        }
        if self.activity_window_days < CHRONIC_DAYS {
            return Err(ConfigError::ValueOutOfRange(
                "MORPHY_ACTIVITY_WINDOW_DAYS must cover the 42-day chronic window",
            ));
        }
        if self.feedback_window == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "MORPHY_FEEDBACK_WINDOW must be positive",
            ));
        }
        if self.default_rest_hr >= self.default_max_hr {
            return Err(ConfigError::ValueOutOfRange(
                "MORPHY_DEFAULT_REST_HR must be below MORPHY_DEFAULT_MAX_HR",
            ));
        }
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "lookback sync={}d webhook={}d, activity window={}d, feedback window={}, \
             default hr {}/{}, learning speed {}",
            self.sync_lookback_days,
            self.webhook_lookback_days,
            self.activity_window_days,
            self.feedback_window,
            self.default_max_hr,
            self.default_rest_hr,
            self.default_learning_speed
        )
    }
}

/// Parse an environment variable, or return the default when unset
fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("Invalid {key} value '{raw}': {e}"))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sync_lookback_days, 7);
        assert_eq!(config.webhook_lookback_days, 3);
        assert_eq!(config.feedback_window, 100);
    }

    #[test]
    fn test_rest_above_max_rejected() {
        let config = ServiceConfig {
            default_rest_hr: 190,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }
}
