//! The per-user profile document.

use serde::{Deserialize, Serialize};

use crate::profile::alarms::AlarmSet;
use crate::profile::filters::FilterSet;
use crate::profile::personal::PersonalEvent;

/// Everything persisted for one user.
///
/// Each section defaults independently so a profile written by an older
/// version still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform visibility flags.
    #[serde(default)]
    pub filters: FilterSet,
    /// Armed contest alarms.
    #[serde(default)]
    pub alarms: AlarmSet,
    /// User-authored calendar events.
    #[serde(default)]
    pub personal_events: Vec<PersonalEvent>,
    /// Usernames on the supported platforms.
    #[serde(default)]
    pub handles: PlatformHandles,
}

/// The user's account names on each platform, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformHandles {
    #[serde(default)]
    pub codeforces: String,
    #[serde(default)]
    pub leetcode: String,
    #[serde(default)]
    pub atcoder: String,
    #[serde(default)]
    pub codechef: String,
    #[serde(default)]
    pub geeksforgeeks: String,
}

impl PlatformHandles {
    /// Sets the handle for the platform named by `key`.
    ///
    /// Returns `false` when the key names no known platform.
    pub fn set(&mut self, key: &str, handle: &str) -> bool {
        let slot = match key {
            "codeforces" => &mut self.codeforces,
            "leetcode" => &mut self.leetcode,
            "atcoder" => &mut self.atcoder,
            "codechef" => &mut self.codechef,
            "geeksforgeeks" => &mut self.geeksforgeeks,
            _ => return false,
        };
        *slot = handle.to_owned();
        true
    }
}
