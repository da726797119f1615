// ABOUTME: Per-activity load models and heart-rate zone maths used by the higher-level engines
// ABOUTME: Enum-dispatched load calculation plus Karvonen zone classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm building blocks
//!
//! Load models are enums rather than strings or flags, so adding a new model is
//! a new variant and the compiler finds every match that needs updating.

/// Per-activity training impulse
pub mod trimp;
/// Karvonen zones and heart-rate ranges
pub mod zones;

pub use trimp::{activity_load, LoadModel};
pub use zones::{classify_karvonen, HeartRateRange, ZoneSpan};
