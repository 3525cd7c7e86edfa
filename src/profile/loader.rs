//! Profile persistence layer for loading and saving user profiles to disk.
//!
//! This module provides the [`ProfileStore`] for persisting profile data
//! between sessions. Profiles are serialized to JSON, one file per user.

use std::path::PathBuf;

use log::{error, info, warn};
use tokio::fs;

use crate::profile::user_profile::UserProfile;

/// Handles loading and persisting user profiles to disk.
///
/// The store is fault tolerant in both directions: a missing or corrupted
/// file loads as a default profile, and a failed save is logged without
/// disturbing the in-memory state, which stays authoritative for the
/// running session.
///
/// # Examples
///
/// ```no_run
/// use algocal::profile::ProfileStore;
///
/// # async fn example() {
/// let store = ProfileStore::new("./data".to_string());
/// let profile = store.load("local").await;
/// store.save("local", &profile).await;
/// # }
/// ```
#[derive(Clone)]
pub struct ProfileStore {
    /// Directory holding one JSON document per user.
    data_dir: String,
}

impl ProfileStore {
    /// Creates a new `ProfileStore` rooted at `data_dir`.
    pub fn new(data_dir: String) -> Self {
        ProfileStore { data_dir }
    }

    /// Path of the profile document for `user_id`.
    fn profile_path(&self, user_id: &str) -> PathBuf {
        let document = format!("{}.json", user_id);
        [self.data_dir.as_str(), document.as_str()].iter().collect()
    }

    /// Loads the profile for `user_id`.
    ///
    /// # Error Handling
    ///
    /// - If the file doesn't exist: logs a warning and returns a default
    ///   profile
    /// - If deserialization fails: logs an error and returns a default
    ///   profile
    ///
    /// This ensures a session can always start, even with corrupted or
    /// missing profile data.
    pub async fn load(&self, user_id: &str) -> UserProfile {
        let path = self.profile_path(user_id);

        let Ok(serialized) = fs::read_to_string(&path).await else {
            warn!(
                "no persisted profile for user {}, starting with defaults",
                user_id
            );
            return UserProfile::default();
        };

        let Ok(profile) = serde_json::from_str(&serialized) else {
            error!(
                "failed to deserialize profile for user {}, starting with defaults",
                user_id
            );
            return UserProfile::default();
        };

        info!("loaded persisted profile for user {}", user_id);

        profile
    }

    /// Persists the profile for `user_id`, best effort.
    ///
    /// Errors are logged but not propagated; the in-memory profile remains
    /// authoritative when a save fails.
    pub async fn save(&self, user_id: &str, profile: &UserProfile) {
        let serialized = match serde_json::to_string(profile) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize profile for user {}: {}", user_id, e);
                return;
            }
        };

        if let Err(e) = fs::create_dir_all(&self.data_dir).await {
            error!("failed to create data directory {}: {}", self.data_dir, e);
            return;
        }

        if let Err(e) = fs::write(self.profile_path(user_id), &serialized).await {
            error!("failed to persist profile for user {}: {}", user_id, e);
            return;
        }

        info!("persisted profile for user {}", user_id);
    }
}
