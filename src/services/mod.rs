// ABOUTME: Domain service layer wiring the intelligence algorithms to the persistence collaborator
// ABOUTME: Side-effecting entry points for backfill, learning, feedback, decisions and phase detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Each service loads what the pure algorithms need from a store, runs them,
//! and writes the results back. Services are protocol-agnostic; translating
//! them to HTTP or any other transport happens outside this crate.

/// Compliance backfill over recent days
pub mod compliance;

/// Today's decision with the athlete's personal thresholds
pub mod decision;

/// Manual feedback submission and statistics
pub mod feedback;

/// Learning runs, status, configuration and reset
pub mod learning;

/// Training phase detection with stored compliance
pub mod phase;
