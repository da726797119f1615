// ABOUTME: In-memory feedback and threshold storage backed by tokio RwLock maps
// ABOUTME: Used by tests and single-process deployments; state is lost on drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use morphy_core::errors::{AppError, AppResult};
use morphy_core::models::{FeedbackRecord, LearningSpeed, ThresholdProfile};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::{FeedbackStore, ProfileGuard, ThresholdStore, UpsertOutcome};

/// In-memory store for feedback rows and threshold profiles
///
/// Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    feedback: Arc<RwLock<HashMap<Uuid, Vec<FeedbackRecord>>>>,
    profiles: Arc<RwLock<HashMap<Uuid, ThresholdProfile>>>,
    profile_locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
    default_speed: LearningSpeed,
}

impl InMemoryStore {
    /// Empty store; new profiles use the moderate learning speed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store whose new profiles use `speed`
    #[must_use]
    pub fn with_default_speed(speed: LearningSpeed) -> Self {
        Self {
            default_speed: speed,
            ..Self::default()
        }
    }

    fn sorted_oldest_first(mut rows: Vec<FeedbackRecord>) -> Vec<FeedbackRecord> {
        rows.sort_by_key(|r| r.date);
        rows
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn append_feedback(&self, user_id: Uuid, record: FeedbackRecord) -> AppResult<()> {
        self.feedback
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(record);
        Ok(())
    }

    async fn upsert_auto_inferred(
        &self,
        user_id: Uuid,
        record: FeedbackRecord,
    ) -> AppResult<UpsertOutcome> {
        if !record.is_auto_inferred() {
            return Err(AppError::invalid_input(
                "only auto-inferred feedback can be upserted by day",
            ));
        }
        let day = record.day();
        let mut guard = self.feedback.write().await;
        let rows = guard.entry(user_id).or_default();

        if let Some(existing) = rows
            .iter_mut()
            .find(|r| r.is_auto_inferred() && r.day() == day)
        {
            let id = existing.id;
            *existing = FeedbackRecord { id, ..record };
            debug!(%user_id, %day, "auto-inferred feedback updated");
            return Ok(UpsertOutcome::Updated);
        }

        rows.push(record);
        debug!(%user_id, %day, "auto-inferred feedback inserted");
        Ok(UpsertOutcome::Inserted)
    }

    async fn recent_feedback(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<FeedbackRecord>> {
        let rows = self
            .feedback
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        let mut rows = Self::sorted_oldest_first(rows);
        rows.reverse();
        rows.truncate(limit);
        Ok(rows)
    }

    async fn feedback_since(
        &self,
        user_id: Uuid,
        from: NaiveDate,
    ) -> AppResult<Vec<FeedbackRecord>> {
        let rows: Vec<FeedbackRecord> = self
            .feedback
            .read()
            .await
            .get(&user_id)
            .map(|rows| rows.iter().filter(|r| r.day() >= from).cloned().collect())
            .unwrap_or_default();
        Ok(Self::sorted_oldest_first(rows))
    }

    async fn all_feedback(&self, user_id: Uuid) -> AppResult<Vec<FeedbackRecord>> {
        let rows = self
            .feedback
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        Ok(Self::sorted_oldest_first(rows))
    }
}

#[async_trait]
impl ThresholdStore for InMemoryStore {
    async fn lock_profile(&self, user_id: Uuid) -> AppResult<ProfileGuard> {
        let lock = {
            let mut locks = self.profile_locks.lock().await;
            Arc::clone(locks.entry(user_id).or_default())
        };
        Ok(lock.lock_owned().await)
    }

    async fn get_or_create_profile(&self, user_id: Uuid) -> AppResult<ThresholdProfile> {
        let existing = self.profiles.read().await.get(&user_id).cloned();
        if let Some(profile) = existing {
            return Ok(profile);
        }
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id).or_insert_with(|| {
            debug!(%user_id, "threshold profile created");
            ThresholdProfile::with_speed(self.default_speed)
        });
        Ok(profile.clone())
    }

    async fn save_profile(&self, user_id: Uuid, profile: &ThresholdProfile) -> AppResult<()> {
        self.profiles.write().await.insert(user_id, profile.clone());
        Ok(())
    }
}
