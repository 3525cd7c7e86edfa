//! Profile controller owning the live profile snapshot.
//!
//! This module provides the [`ProfileController`] which applies the pure
//! update operations to the current [`UserProfile`] snapshot and persists
//! the result best effort.

use std::sync::Arc;

use chrono::{DateTime, Local};
use log::info;
use tokio::sync::Mutex;

use crate::contests::{EventId, Platform};
use crate::profile::alarms::{is_armed, toggle};
use crate::profile::loader::ProfileStore;
use crate::profile::personal::{PersonalEvent, add_event, remove_event};
use crate::profile::user_profile::UserProfile;

/// Owns the current profile snapshot for one user.
///
/// Every mutation goes through a pure update function producing a new
/// snapshot, which is swapped in under the lock and then saved. The save is
/// optimistic: a persistence failure never rolls back the in-memory state.
///
/// # Thread Safety
///
/// The snapshot sits behind a `Mutex`, so a notification pass reading the
/// alarm set never observes a half-applied update.
///
/// # Examples
///
/// ```no_run
/// use algocal::contests::EventId;
/// use algocal::profile::{ProfileController, ProfileStore};
///
/// # async fn example() {
/// let store = ProfileStore::new("./data".to_string());
/// let controller = ProfileController::new(store, "local").await;
///
/// let armed = controller
///     .toggle_alarm(&EventId::single("7"), "Round 999", chrono::Local::now())
///     .await;
/// println!("alarm armed: {}", armed);
/// # }
/// ```
pub struct ProfileController {
    /// User the snapshot belongs to.
    user_id: String,
    /// Live profile snapshot.
    profile: Arc<Mutex<UserProfile>>,
    /// Store used for best-effort persistence.
    store: ProfileStore,
}

impl ProfileController {
    /// Creates a controller for `user_id`, loading any persisted profile.
    pub async fn new(store: ProfileStore, user_id: &str) -> Self {
        let profile = Arc::new(Mutex::new(store.load(user_id).await));

        ProfileController {
            user_id: user_id.to_owned(),
            profile,
            store,
        }
    }

    /// Returns a clone of the current profile snapshot.
    pub async fn profile(&self) -> UserProfile {
        self.profile.lock().await.clone()
    }

    /// Toggles the alarm for the contest behind `event_id`.
    ///
    /// Returns whether the contest is armed after the toggle.
    pub async fn toggle_alarm(
        &self,
        event_id: &EventId,
        title: &str,
        start: DateTime<Local>,
    ) -> bool {
        let snapshot = {
            let mut profile = self.profile.lock().await;
            profile.alarms = toggle(&profile.alarms, event_id, title, start);
            profile.clone()
        };
        let armed = is_armed(&snapshot.alarms, event_id);

        info!(
            "{} alarm for contest {} for user {}",
            if armed { "armed" } else { "disarmed" },
            event_id.base(),
            self.user_id
        );

        self.store.save(&self.user_id, &snapshot).await;
        armed
    }

    /// Flips the visibility flag for `platform`.
    ///
    /// Returns whether the platform is visible after the toggle.
    pub async fn toggle_filter(&self, platform: Platform) -> bool {
        let snapshot = {
            let mut profile = self.profile.lock().await;
            profile.filters = profile.filters.toggled(platform);
            profile.clone()
        };
        let visible = snapshot.filters.allows(platform);

        info!(
            "platform {} is now {} for user {}",
            platform,
            if visible { "shown" } else { "hidden" },
            self.user_id
        );

        self.store.save(&self.user_id, &snapshot).await;
        visible
    }

    /// Adds a personal event to the calendar surface.
    pub async fn add_personal_event(&self, event: PersonalEvent) {
        let snapshot = {
            let mut profile = self.profile.lock().await;
            profile.personal_events = add_event(&profile.personal_events, event.clone());
            profile.clone()
        };

        info!(
            "added personal event {} for user {}",
            event.id, self.user_id
        );

        self.store.save(&self.user_id, &snapshot).await;
    }

    /// Removes the personal event identified by `event_id`.
    pub async fn remove_personal_event(&self, event_id: &str) {
        let snapshot = {
            let mut profile = self.profile.lock().await;
            profile.personal_events = remove_event(&profile.personal_events, event_id);
            profile.clone()
        };

        info!(
            "removed personal event {} for user {}",
            event_id, self.user_id
        );

        self.store.save(&self.user_id, &snapshot).await;
    }

    /// Sets the user's handle for the platform named by `key`.
    ///
    /// Returns `false` when the key names no known platform.
    pub async fn set_handle(&self, key: &str, handle: &str) -> bool {
        let snapshot = {
            let mut profile = self.profile.lock().await;
            if !profile.handles.set(key, handle) {
                return false;
            }
            profile.clone()
        };

        info!("set {} handle for user {}", key, self.user_id);

        self.store.save(&self.user_id, &snapshot).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn test_start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 10, 17, 35, 0).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_alarm_arms_and_disarms() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().to_str().unwrap().to_string());
        let controller = ProfileController::new(store, "local").await;

        assert!(
            controller
                .toggle_alarm(&EventId::single("7"), "Round 999", test_start())
                .await
        );
        assert_eq!(controller.profile().await.alarms.len(), 1);

        assert!(
            !controller
                .toggle_alarm(&EventId::part("7", 2), "Round 999", test_start())
                .await
        );
        assert!(controller.profile().await.alarms.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_alarm_persists_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        let controller =
            ProfileController::new(ProfileStore::new(path.clone()), "local").await;
        controller
            .toggle_alarm(&EventId::single("7"), "Round 999", test_start())
            .await;

        // A fresh controller sees the persisted alarm
        let reloaded = ProfileController::new(ProfileStore::new(path), "local").await;
        assert_eq!(reloaded.profile().await.alarms.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_in_memory_state() {
        let dir = tempdir().unwrap();
        // Point the store at a file so the data directory cannot be created
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let store = ProfileStore::new(blocked.to_str().unwrap().to_string());
        let controller = ProfileController::new(store, "local").await;

        assert!(
            controller
                .toggle_alarm(&EventId::single("7"), "Round 999", test_start())
                .await
        );
        assert_eq!(controller.profile().await.alarms.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_filter() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().to_str().unwrap().to_string());
        let controller = ProfileController::new(store, "local").await;

        assert!(!controller.toggle_filter(Platform::Atcoder).await);
        assert!(!controller.profile().await.filters.atcoder);
        assert!(controller.toggle_filter(Platform::Atcoder).await);
    }

    #[tokio::test]
    async fn test_personal_event_lifecycle() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().to_str().unwrap().to_string());
        let controller = ProfileController::new(store, "local").await;
        let event = PersonalEvent::new("Study session", test_start(), false);

        controller.add_personal_event(event.clone()).await;
        assert_eq!(controller.profile().await.personal_events.len(), 1);

        controller.remove_personal_event(&event.id).await;
        assert!(controller.profile().await.personal_events.is_empty());
    }

    #[tokio::test]
    async fn test_set_handle_rejects_unknown_platform() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::new(dir.path().to_str().unwrap().to_string());
        let controller = ProfileController::new(store, "local").await;

        assert!(controller.set_handle("geeksforgeeks", "gfg_user").await);
        assert!(!controller.set_handle("topcoder", "nobody").await);
        assert_eq!(controller.profile().await.handles.geeksforgeeks, "gfg_user");
    }
}
