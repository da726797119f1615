// ABOUTME: Core types and constants for the Morphy training decision engine
// ABOUTME: Foundation crate with error handling, domain constants and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Morphy Core
//!
//! Foundation crate shared by the intelligence algorithms and the service layer.
//! It changes rarely, which keeps incremental builds of the workspace cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Domain constants (windows, defaults, multiplier bounds)
//! - **models**: Activity records, athlete profile, feedback rows and threshold profiles

/// Unified error handling system with standard error codes
pub mod errors;

/// Domain constants organized by concern
pub mod constants;

/// Core data models (activities, profile, feedback, thresholds)
pub mod models;
