//! Per-user profile state: alarms, filters, personal events, and handles.
//!
//! This module holds everything a user configures, modelled as immutable
//! snapshots with pure update functions:
//!
//! - [`AlarmEntry`] + [`toggle`]/[`is_armed`]: contest reminder alarms keyed
//!   on contest identity
//! - [`FilterSet`]: per-platform visibility flags
//! - [`PersonalEvent`]: user-authored calendar entries
//! - [`UserProfile`]: the persisted document combining the above
//! - [`ProfileStore`]: fault-tolerant JSON persistence, one file per user
//! - [`ProfileController`]: owner of the live snapshot, applying updates and
//!   saving best effort
//!
//! # Example Usage
//!
//! ```no_run
//! use algocal::contests::EventId;
//! use algocal::profile::{ProfileController, ProfileStore};
//!
//! # async fn example() {
//! let store = ProfileStore::new("./data".to_string());
//! let controller = ProfileController::new(store, "local").await;
//!
//! controller
//!     .toggle_alarm(&EventId::single("42"), "Long Challenge", chrono::Local::now())
//!     .await;
//! # }
//! ```

mod alarms;
mod controller;
mod filters;
mod loader;
mod personal;
mod user_profile;

pub use crate::profile::alarms::{AlarmEntry, AlarmSet, is_armed, toggle};
pub use crate::profile::controller::ProfileController;
pub use crate::profile::filters::FilterSet;
pub use crate::profile::loader::ProfileStore;
pub use crate::profile::personal::{PERSONAL_EVENT_COLOR, PersonalEvent, add_event, remove_event};
pub use crate::profile::user_profile::{PlatformHandles, UserProfile};
