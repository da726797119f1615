// ABOUTME: Persistence collaborator traits for feedback rows and threshold profiles
// ABOUTME: Async provider abstraction so services run against memory or a real database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Storage abstraction
//!
//! The intelligence crate never touches storage. Services load what it needs
//! through these traits and write results back through them.
//!
//! A learning run reads a threshold profile, recomputes it and saves it. Two
//! runs for the same athlete must not interleave, so [`ThresholdStore`]
//! hands out a per-athlete guard that services hold for the whole cycle.

use async_trait::async_trait;
use chrono::NaiveDate;
use morphy_core::errors::AppResult;
use morphy_core::models::{FeedbackRecord, ThresholdProfile};
use serde::{Deserialize, Serialize};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// In-memory backend
pub mod memory;

pub use memory::InMemoryStore;

/// Guard serializing profile read-modify-write cycles for one athlete
pub type ProfileGuard = OwnedMutexGuard<()>;

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// A new row was stored
    Inserted,
    /// An existing row for the same day was overwritten
    Updated,
}

/// Feedback row storage
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Append a manual feedback row
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be stored
    async fn append_feedback(&self, user_id: Uuid, record: FeedbackRecord) -> AppResult<()>;

    /// Insert an auto-inferred row, or overwrite the one already stored for that day
    ///
    /// The stored row keeps its original id when overwritten.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a manual row, or an error if storage fails
    async fn upsert_auto_inferred(
        &self,
        user_id: Uuid,
        record: FeedbackRecord,
    ) -> AppResult<UpsertOutcome>;

    /// Most recent rows, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if rows cannot be read
    async fn recent_feedback(&self, user_id: Uuid, limit: usize)
        -> AppResult<Vec<FeedbackRecord>>;

    /// Rows dated on or after `from`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if rows cannot be read
    async fn feedback_since(&self, user_id: Uuid, from: NaiveDate)
        -> AppResult<Vec<FeedbackRecord>>;

    /// Every row for the athlete, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if rows cannot be read
    async fn all_feedback(&self, user_id: Uuid) -> AppResult<Vec<FeedbackRecord>>;
}

/// Threshold profile storage
#[async_trait]
pub trait ThresholdStore: Send + Sync {
    /// Acquire the per-athlete profile guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard cannot be obtained
    async fn lock_profile(&self, user_id: Uuid) -> AppResult<ProfileGuard>;

    /// Load the athlete's profile, creating a neutral one on first access
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read or created
    async fn get_or_create_profile(&self, user_id: Uuid) -> AppResult<ThresholdProfile>;

    /// Persist a profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written
    async fn save_profile(&self, user_id: Uuid, profile: &ThresholdProfile) -> AppResult<()>;
}
