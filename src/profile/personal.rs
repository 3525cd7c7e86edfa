//! User-authored calendar events.
//!
//! Personal events share the calendar surface with normalized contests but
//! are not derived from any listing record and have no base-id
//! relationship.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contests::{CalendarEvent, EventId, Platform};

/// Display color for personal events on the calendar surface.
pub const PERSONAL_EVENT_COLOR: &str = "#8b5cf6";

/// A calendar entry the user created themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalEvent {
    /// Locally generated identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Start of the event in machine-local time.
    pub start: DateTime<Local>,
    /// Whether the event spans the whole day.
    pub all_day: bool,
}

impl PersonalEvent {
    /// Creates a new personal event with a fresh identifier.
    pub fn new(title: &str, start: DateTime<Local>, all_day: bool) -> Self {
        PersonalEvent {
            id: Uuid::new_v4().to_string(),
            title: title.to_owned(),
            start,
            all_day,
        }
    }

    /// Converts the event for the shared calendar surface.
    ///
    /// Personal events render under the `other` platform key with their own
    /// fixed color; fetched contests never use that key.
    pub fn to_calendar_event(&self) -> CalendarEvent {
        CalendarEvent {
            id: EventId::single(self.id.clone()),
            title: self.title.clone(),
            url: String::new(),
            start: self.start,
            end: None,
            all_day: self.all_day,
            color: PERSONAL_EVENT_COLOR.to_string(),
            platform: Platform::Other,
        }
    }
}

/// Returns a new list with `event` appended.
pub fn add_event(events: &[PersonalEvent], event: PersonalEvent) -> Vec<PersonalEvent> {
    let mut next = events.to_vec();
    next.push(event);
    next
}

/// Returns a new list without the event identified by `id`.
pub fn remove_event(events: &[PersonalEvent], id: &str) -> Vec<PersonalEvent> {
    events
        .iter()
        .filter(|event| event.id != id)
        .cloned()
        .collect()
}
