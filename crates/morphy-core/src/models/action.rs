// ABOUTME: Training action vocabulary and the learning class each action belongs to
// ABOUTME: Parses current action names plus the legacy rest/reduce/maintain/increase aliases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Coarse class of a recommendation, shared by compliance rules and the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionClass {
    /// Take the day off or move very lightly
    Rest,
    /// Train, but below the usual load
    Reduce,
    /// Keep the usual load
    Maintain,
    /// Push the load up
    Increase,
}

impl ActionClass {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Reduce => "reduce",
            Self::Maintain => "maintain",
            Self::Increase => "increase",
        }
    }
}

impl fmt::Display for ActionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended action for a training day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAction {
    /// Very light movement only, injury risk is high
    #[serde(alias = "rest")]
    ActiveRecovery,
    /// Easy aerobic work, load is elevated
    #[serde(alias = "reduce")]
    Easy,
    /// Technique-focused easy session, fatigue has accumulated
    Recovery,
    /// Key session with intensity, athlete is fresh
    #[serde(alias = "increase")]
    Quality,
    /// Gentle return after several days off
    Comeback,
    /// Regular aerobic training
    #[serde(alias = "maintain")]
    Moderate,
}

impl TrainingAction {
    /// All actions in decision order
    pub const ALL: [Self; 6] = [
        Self::ActiveRecovery,
        Self::Easy,
        Self::Recovery,
        Self::Quality,
        Self::Comeback,
        Self::Moderate,
    ];

    /// Stable snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActiveRecovery => "active_recovery",
            Self::Easy => "easy",
            Self::Recovery => "recovery",
            Self::Quality => "quality",
            Self::Comeback => "comeback",
            Self::Moderate => "moderate",
        }
    }

    /// Learning and compliance class of this action
    #[must_use]
    pub const fn class(self) -> ActionClass {
        match self {
            Self::ActiveRecovery => ActionClass::Rest,
            Self::Easy | Self::Recovery => ActionClass::Reduce,
            Self::Quality | Self::Comeback => ActionClass::Increase,
            Self::Moderate => ActionClass::Maintain,
        }
    }
}

impl fmt::Display for TrainingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active_recovery" | "rest" => Ok(Self::ActiveRecovery),
            "easy" | "reduce" => Ok(Self::Easy),
            "recovery" => Ok(Self::Recovery),
            "quality" | "increase" => Ok(Self::Quality),
            "comeback" => Ok(Self::Comeback),
            "moderate" | "maintain" => Ok(Self::Moderate),
            other => Err(AppError::invalid_input(format!(
                "unknown training action '{other}'"
            ))),
        }
    }
}

/// Karvonen intensity zone detected for an activity, or `None` for no usable data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingZone {
    /// No measurable activity
    #[serde(rename = "none")]
    None,
    /// Zone 1, recovery
    Z1,
    /// Zone 2, aerobic base
    Z2,
    /// Zone 3, tempo
    Z3,
    /// Zone 4, threshold
    Z4,
    /// Zone 5, maximal
    Z5,
}

impl TrainingZone {
    /// Zone number, 0 for `None`
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Z1 => 1,
            Self::Z2 => 2,
            Self::Z3 => 3,
            Self::Z4 => 4,
            Self::Z5 => 5,
        }
    }

    /// Zone from its number; anything outside 1..=5 maps to `None`
    #[must_use]
    pub const fn from_number(number: u8) -> Self {
        match number {
            1 => Self::Z1,
            2 => Self::Z2,
            3 => Self::Z3,
            4 => Self::Z4,
            5 => Self::Z5,
            _ => Self::None,
        }
    }

    /// Display label such as `"Z2"` or `"none"`
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Z1 => "Z1",
            Self::Z2 => "Z2",
            Self::Z3 => "Z3",
            Self::Z4 => "Z4",
            Self::Z5 => "Z5",
        }
    }
}

impl fmt::Display for TrainingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
