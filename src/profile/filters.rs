//! Per-platform visibility filters for the calendar surface.

use serde::{Deserialize, Serialize};

use crate::contests::{CalendarEvent, Platform};

/// Which platforms are currently shown, all visible by default.
///
/// Treated as an immutable snapshot: [`FilterSet::toggled`] returns a new
/// snapshot instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default = "visible")]
    pub codeforces: bool,
    #[serde(default = "visible")]
    pub leetcode: bool,
    #[serde(default = "visible")]
    pub atcoder: bool,
    #[serde(default = "visible")]
    pub codechef: bool,
    #[serde(default = "visible")]
    pub other: bool,
}

fn visible() -> bool {
    true
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet {
            codeforces: true,
            leetcode: true,
            atcoder: true,
            codechef: true,
            other: true,
        }
    }
}

impl FilterSet {
    /// Returns a new snapshot with the flag for `platform` flipped.
    pub fn toggled(&self, platform: Platform) -> FilterSet {
        let mut next = *self;
        match platform {
            Platform::Codeforces => next.codeforces = !self.codeforces,
            Platform::Leetcode => next.leetcode = !self.leetcode,
            Platform::Atcoder => next.atcoder = !self.atcoder,
            Platform::Codechef => next.codechef = !self.codechef,
            Platform::Other => next.other = !self.other,
        }
        next
    }

    /// Whether events from `platform` are currently visible.
    pub fn allows(&self, platform: Platform) -> bool {
        match platform {
            Platform::Codeforces => self.codeforces,
            Platform::Leetcode => self.leetcode,
            Platform::Atcoder => self.atcoder,
            Platform::Codechef => self.codechef,
            Platform::Other => self.other,
        }
    }

    /// Keeps only the events whose platform is visible.
    pub fn apply(&self, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
        events
            .iter()
            .filter(|event| self.allows(event.platform))
            .cloned()
            .collect()
    }
}
