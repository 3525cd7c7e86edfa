//! Alarm entries and the pure operations on the alarm set.
//!
//! This module provides the [`AlarmEntry`] struct for tracking which
//! contests a user wants a reminder for, plus the [`toggle`] and
//! [`is_armed`] operations keyed on contest identity.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::contests::EventId;

/// The set of alarms a user has armed, at most one per contest.
///
/// Treated as an immutable snapshot: [`toggle`] returns a new set instead
/// of mutating in place, so a concurrent reader never observes a
/// half-updated set.
pub type AlarmSet = HashSet<AlarmEntry>;

/// A standing request to be reminded before one contest starts.
///
/// # Equality and Hashing
///
/// Two entries are considered equal if they refer to the same contest
/// (same base id), regardless of title or start. This is what collapses an
/// alarm armed from any split part of a multi-day contest into a single
/// entry.
///
/// # Examples
///
/// ```
/// # use algocal::profile::AlarmEntry;
/// # use chrono::Local;
/// let entry = AlarmEntry {
///     base_contest_id: "42".to_string(),
///     title: "Weekly Contest".to_string(),
///     start: Local::now(),
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlarmEntry {
    /// Base id of the contest, never a split-part id.
    pub base_contest_id: String,
    /// Contest title, kept for notification display.
    pub title: String,
    /// Start of the original contest, not of a split part.
    pub start: DateTime<Local>,
}

impl AlarmEntry {
    /// The base id this entry is keyed on.
    ///
    /// Entries written by [`toggle`] always store a base id, but recovery
    /// is applied anyway so a part id from an older store still matches.
    fn base(&self) -> String {
        EventId::parse(&self.base_contest_id).base().to_owned()
    }
}

/// Two entries are equal when they refer to the same contest.
impl PartialEq for AlarmEntry {
    fn eq(&self, other: &Self) -> bool {
        self.base() == other.base()
    }
}

impl Eq for AlarmEntry {}

/// Hashes by recovered base id only, consistent with equality.
impl Hash for AlarmEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base().hash(state);
    }
}

/// Toggles the alarm for the contest behind `event_id`.
///
/// If the set already holds an entry for the same contest (matching by
/// recovered base id, so the caller may pass either a split-part id or the
/// base id), that entry is removed. Otherwise a new entry is inserted with
/// the recovered base id. Either way a new snapshot is returned; the input
/// set is untouched.
///
/// Toggling twice with the same id restores the original set.
///
/// # Arguments
///
/// * `alarms` - The current alarm snapshot.
/// * `event_id` - Identity of the clicked event; any split part works.
/// * `title` - Contest title stored on insert.
/// * `start` - Start of the original contest stored on insert.
pub fn toggle(
    alarms: &AlarmSet,
    event_id: &EventId,
    title: &str,
    start: DateTime<Local>,
) -> AlarmSet {
    let mut next = alarms.clone();
    let existing = next
        .iter()
        .find(|entry| entry.base() == event_id.base())
        .cloned();

    match existing {
        Some(entry) => {
            next.remove(&entry);
        }
        None => {
            next.insert(AlarmEntry {
                base_contest_id: event_id.base().to_owned(),
                title: title.to_owned(),
                start,
            });
        }
    }

    next
}

/// Whether the event behind `event_id` has an armed alarm.
///
/// Membership is by recovered base id, so every split part of an armed
/// multi-day contest answers true.
pub fn is_armed(alarms: &AlarmSet, event_id: &EventId) -> bool {
    alarms.iter().any(|entry| entry.base() == event_id.base())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 10, 17, 35, 0).unwrap()
    }

    #[test]
    fn test_toggle_inserts_when_absent() {
        let alarms = AlarmSet::new();

        let next = toggle(&alarms, &EventId::single("7"), "Round 999", test_start());

        assert_eq!(next.len(), 1);
        let entry = next.iter().next().unwrap();
        assert_eq!(entry.base_contest_id, "7");
        assert_eq!(entry.title, "Round 999");
        assert_eq!(entry.start, test_start());
    }

    #[test]
    fn test_toggle_removes_when_present() {
        let alarms = toggle(
            &AlarmSet::new(),
            &EventId::single("7"),
            "Round 999",
            test_start(),
        );

        let next = toggle(&alarms, &EventId::single("7"), "Round 999", test_start());

        assert!(next.is_empty());
    }

    #[test]
    fn test_toggle_is_involutive() {
        let alarms = toggle(
            &AlarmSet::new(),
            &EventId::single("9"),
            "Long Challenge",
            test_start(),
        );

        let twice = toggle(
            &toggle(&alarms, &EventId::single("7"), "Round 999", test_start()),
            &EventId::single("7"),
            "Round 999",
            test_start(),
        );

        assert_eq!(twice, alarms);
    }

    #[test]
    fn test_toggle_from_split_part_stores_base_id() {
        let next = toggle(
            &AlarmSet::new(),
            &EventId::part("42", 1),
            "Long Challenge",
            test_start(),
        );

        assert_eq!(next.iter().next().unwrap().base_contest_id, "42");
    }

    #[test]
    fn test_toggle_collapses_split_parts() {
        // Arming day 2 after day 1 must remove the entry, not add a second
        let armed = toggle(
            &AlarmSet::new(),
            &EventId::part("42", 0),
            "Long Challenge",
            test_start(),
        );

        let next = toggle(&armed, &EventId::part("42", 1), "Long Challenge", test_start());

        assert!(next.is_empty());
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let alarms = AlarmSet::new();

        let _ = toggle(&alarms, &EventId::single("7"), "Round 999", test_start());

        assert!(alarms.is_empty());
    }

    #[test]
    fn test_toggle_distinguishes_similar_bases() {
        // Base "4" and base "42" are different contests
        let armed = toggle(&AlarmSet::new(), &EventId::single("4"), "A", test_start());

        let next = toggle(&armed, &EventId::single("42"), "B", test_start());

        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_is_armed_matches_every_split_part() {
        let armed = toggle(
            &AlarmSet::new(),
            &EventId::part("42", 0),
            "Long Challenge",
            test_start(),
        );

        assert!(is_armed(&armed, &EventId::part("42", 3)));
        assert!(is_armed(&armed, &EventId::single("42")));
        assert!(!is_armed(&armed, &EventId::single("7")));
    }

    #[test]
    fn test_is_armed_on_empty_set() {
        assert!(!is_armed(&AlarmSet::new(), &EventId::single("7")));
    }

    #[test]
    fn test_entry_equality_ignores_title_and_start() {
        let first = AlarmEntry {
            base_contest_id: "7".to_string(),
            title: "Round 999".to_string(),
            start: test_start(),
        };
        let second = AlarmEntry {
            base_contest_id: "7".to_string(),
            title: "Renamed".to_string(),
            start: test_start() + chrono::Duration::hours(1),
        };

        assert_eq!(first, second);
    }

    #[test]
    fn test_legacy_part_id_entry_still_matches() {
        // An entry persisted with a part id matches its contest
        let mut alarms = AlarmSet::new();
        alarms.insert(AlarmEntry {
            base_contest_id: "42_part1".to_string(),
            title: "Long Challenge".to_string(),
            start: test_start(),
        });

        assert!(is_armed(&alarms, &EventId::single("42")));
        assert!(toggle(&alarms, &EventId::part("42", 0), "Long Challenge", test_start()).is_empty());
    }
}
