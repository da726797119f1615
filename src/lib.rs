// ABOUTME: Main library entry point for the Morphy training decision service layer
// ABOUTME: Wires the intelligence algorithms to storage, configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Morphy
//!
//! Adaptive daily training decisions. Morphy estimates an athlete's training
//! load from recent activities, recommends today's action, infers after the
//! fact whether past recommendations were followed, and learns personal
//! thresholds from that feedback.
//!
//! ## Architecture
//!
//! - **`morphy-core`**: error types, constants and data models
//! - **`morphy-intelligence`**: pure algorithms with no I/O
//! - **this crate**: storage traits, services, configuration and logging
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use morphy::config::ServiceConfig;
//! use morphy::services::learning::analyze_and_adjust;
//! use morphy::store::InMemoryStore;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     morphy::logging::init_from_env()?;
//!     let config = ServiceConfig::from_env()?;
//!     let store = InMemoryStore::with_default_speed(config.default_learning_speed);
//!
//!     let report = analyze_and_adjust(&store, Uuid::new_v4(), &config, Utc::now()).await?;
//!     println!("learning active: {}", report.learning_active);
//!     Ok(())
//! }
//! ```

/// Service configuration from environment variables
pub mod config;

/// Structured logging setup
pub mod logging;

/// Domain services
pub mod services;

/// Persistence collaborator traits and the in-memory backend
pub mod store;

pub use morphy_core::errors::{AppError, AppResult, ErrorCode};
