//! Reminder scheduling for armed contests.
//!
//! This module decides, once per tick, which armed events are exactly at
//! the reminder mark and builds the notifications to deliver.

use std::fmt;

use chrono::{DateTime, Local};

use crate::contests::CalendarEvent;
use crate::profile::{AlarmSet, is_armed};

/// Seconds between scheduling passes.
pub const TICK_INTERVAL_SECS: u64 = 60;

/// Whole minutes before an event's start at which its reminder fires.
pub const REMINDER_LEAD_MINUTES: i64 = 15;

/// A reminder ready for delivery through a notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestNotification {
    /// Notification headline.
    pub title: String,
    /// Notification body naming the contest.
    pub body: String,
    /// Platform icon to display alongside.
    pub icon: String,
}

impl fmt::Display for ContestNotification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

/// Returns the notifications due at `now`, one per armed event sitting
/// exactly at the reminder mark.
///
/// For every event whose contest is armed, `minutes_left` is the whole
/// number of minutes until its start; a notification is built only when
/// that equals [`REMINDER_LEAD_MINUTES`] exactly. This is a point-in-time
/// match, not a window: with one pass per minute the reminder is delivered
/// exactly once as time crosses the mark, and is silently skipped when a
/// pass is delayed past it (for instance after a suspend) or when the mark
/// already lay in the past at startup. The pass keeps no record of what it
/// fired.
///
/// # Examples
///
/// ```no_run
/// use algocal::scheduler::due_notifications;
///
/// # fn example(events: &[algocal::contests::CalendarEvent],
/// #            alarms: &algocal::profile::AlarmSet) {
/// let due = due_notifications(events, alarms, chrono::Local::now());
/// for notification in &due {
///     println!("{}", notification);
/// }
/// # }
/// ```
pub fn due_notifications(
    events: &[CalendarEvent],
    alarms: &AlarmSet,
    now: DateTime<Local>,
) -> Vec<ContestNotification> {
    events
        .iter()
        .filter(|event| is_armed(alarms, &event.id))
        .filter_map(|event| {
            let minutes_left = (event.start - now).num_minutes();
            if minutes_left == REMINDER_LEAD_MINUTES {
                Some(ContestNotification {
                    title: "Contest Starting Soon!".to_string(),
                    body: format!("{} starts in 15 minutes!", event.title),
                    icon: event.platform.icon().to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::{EventId, Platform};
    use crate::profile::toggle;
    use chrono::{Duration, TimeZone};

    fn create_test_event(id: EventId, start: DateTime<Local>) -> CalendarEvent {
        CalendarEvent {
            id,
            title: "Round 999".to_string(),
            url: "https://codeforces.com/contests/999".to_string(),
            start,
            end: None,
            all_day: false,
            color: Platform::Codeforces.color().to_string(),
            platform: Platform::Codeforces,
        }
    }

    fn armed_for(event: &CalendarEvent) -> AlarmSet {
        toggle(&AlarmSet::new(), &event.id, &event.title, event.start)
    }

    #[test]
    fn test_fires_exactly_at_the_mark() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let event = create_test_event(EventId::single("7"), now + Duration::minutes(15));
        let alarms = armed_for(&event);

        let due = due_notifications(&[event], &alarms, now);

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "Contest Starting Soon!");
        assert_eq!(due[0].body, "Round 999 starts in 15 minutes!");
        assert_eq!(due[0].icon, Platform::Codeforces.icon());
    }

    #[test]
    fn test_fires_anywhere_inside_the_minute() {
        // 15m59s away still floors to 15 whole minutes
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let event = create_test_event(
            EventId::single("7"),
            now + Duration::minutes(15) + Duration::seconds(59),
        );
        let alarms = armed_for(&event);

        assert_eq!(due_notifications(&[event], &alarms, now).len(), 1);
    }

    #[test]
    fn test_silent_one_minute_either_side() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let before = create_test_event(EventId::single("7"), now + Duration::minutes(14));
        let after = create_test_event(EventId::single("8"), now + Duration::minutes(16));
        let mut alarms = armed_for(&before);
        alarms.extend(armed_for(&after));

        assert!(due_notifications(&[before, after], &alarms, now).is_empty());
    }

    #[test]
    fn test_silent_for_unarmed_events() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let event = create_test_event(EventId::single("7"), now + Duration::minutes(15));

        assert!(due_notifications(&[event], &AlarmSet::new(), now).is_empty());
    }

    #[test]
    fn test_armed_split_part_fires_off_its_own_start() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 11, 45, 0).unwrap();
        let part = create_test_event(EventId::part("42", 1), now + Duration::minutes(15));
        // Armed from a different part of the same contest
        let alarms = toggle(
            &AlarmSet::new(),
            &EventId::part("42", 0),
            "Round 999",
            now - Duration::days(1),
        );

        assert_eq!(due_notifications(&[part], &alarms, now).len(), 1);
    }

    #[test]
    fn test_silent_for_already_started_event() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let event = create_test_event(EventId::single("7"), now - Duration::minutes(15));
        let alarms = armed_for(&event);

        assert!(due_notifications(&[event], &alarms, now).is_empty());
    }

    #[test]
    fn test_multiple_armed_events_at_the_mark() {
        let now = Local.with_ymd_and_hms(2026, 8, 10, 17, 20, 0).unwrap();
        let first = create_test_event(EventId::single("7"), now + Duration::minutes(15));
        let second = create_test_event(EventId::single("8"), now + Duration::minutes(15));
        let mut alarms = armed_for(&first);
        alarms.extend(armed_for(&second));

        assert_eq!(due_notifications(&[first, second], &alarms, now).len(), 2);
    }
}
