//! Internal data structures for normalized contest calendar events.
//!
//! This module defines the event identity scheme, the platform lookup table,
//! and the [`CalendarEvent`] struct produced by the normalizer.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of a calendar event, traced back to one listed contest.
///
/// An event is either the whole contest (`part` absent) or one day-slice of a
/// multi-day contest (`part` carries the 0-based day index). The identity is
/// kept structured internally; the encoded string form (`"{base}"` or
/// `"{base}_part{k}"`) only exists at the display/serialization boundary, so
/// a source id that happens to contain the separator cannot be conflated
/// with a split part.
///
/// # Base id recovery
///
/// [`EventId::parse`] recovers the base id from any encoded form without
/// consulting the original listing: everything before the first `_` is the
/// base (no separator means the string is already a base id). This is the
/// join key between calendar events and alarm entries.
///
/// # Examples
///
/// ```
/// use algocal::contests::EventId;
///
/// assert_eq!(EventId::parse("42_part3").base(), "42");
/// assert_eq!(EventId::parse("42").base(), "42");
/// assert_eq!(EventId::part("42", 3).to_string(), "42_part3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId {
    /// Identifier of the originating contest.
    base: String,
    /// 0-based day index for split parts of a multi-day contest.
    part: Option<u32>,
}

impl EventId {
    /// Creates the identity of a single-day (unsplit) event.
    pub fn single(base: impl Into<String>) -> Self {
        EventId {
            base: base.into(),
            part: None,
        }
    }

    /// Creates the identity of day-slice `index` of a multi-day contest.
    pub fn part(base: impl Into<String>, index: u32) -> Self {
        EventId {
            base: base.into(),
            part: Some(index),
        }
    }

    /// Recovers an identity from its encoded string form.
    ///
    /// The substring before the first `_` is the base id; without a
    /// separator the whole string is the base id. A suffix that does not
    /// look like a part marker still only contributes to base recovery.
    pub fn parse(encoded: &str) -> Self {
        match encoded.split_once('_') {
            Some((base, rest)) => EventId {
                base: base.to_owned(),
                part: rest.strip_prefix("part").and_then(|k| k.parse().ok()),
            },
            None => EventId {
                base: encoded.to_owned(),
                part: None,
            },
        }
    }

    /// The identifier of the originating contest.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The 0-based day index, if this identifies a split part.
    pub fn part_index(&self) -> Option<u32> {
        self.part
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.part {
            Some(k) => write!(f, "{}_part{}", self.base, k),
            None => write!(f, "{}", self.base),
        }
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Ok(EventId::parse(&encoded))
    }
}

/// Supported contest platforms plus the bucket for user-added events.
///
/// Fetched contests only ever map to the four listed platforms; `Other`
/// exists for the display of personal events and is never produced by the
/// listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    Leetcode,
    Atcoder,
    Codechef,
    Other,
}

impl Platform {
    /// Maps a listing resource domain to its platform.
    ///
    /// Returns `None` for any domain outside the allowed set; such records
    /// are excluded entirely rather than bucketed into [`Platform::Other`].
    pub fn from_resource(resource: &str) -> Option<Platform> {
        match resource {
            "codeforces.com" => Some(Platform::Codeforces),
            "leetcode.com" => Some(Platform::Leetcode),
            "atcoder.jp" => Some(Platform::Atcoder),
            "codechef.com" => Some(Platform::Codechef),
            _ => None,
        }
    }

    /// Stable lowercase key used in filters and display.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::Leetcode => "leetcode",
            Platform::Atcoder => "atcoder",
            Platform::Codechef => "codechef",
            Platform::Other => "other",
        }
    }

    /// Parses a platform from its lowercase key.
    pub fn from_key(key: &str) -> Option<Platform> {
        match key {
            "codeforces" => Some(Platform::Codeforces),
            "leetcode" => Some(Platform::Leetcode),
            "atcoder" => Some(Platform::Atcoder),
            "codechef" => Some(Platform::Codechef),
            "other" => Some(Platform::Other),
            _ => None,
        }
    }

    /// Display color for events of this platform.
    pub fn color(&self) -> &'static str {
        match self {
            Platform::Codeforces => "#FFC107",
            Platform::Leetcode => "#FFA116",
            Platform::Atcoder => "#000000",
            Platform::Codechef => "#D32F2F",
            Platform::Other => "#3b82f6",
        }
    }

    /// Icon carried in notifications for events of this platform.
    pub fn icon(&self) -> &'static str {
        match self {
            Platform::Codeforces => {
                "https://cdn.iconscout.com/icon/free/png-256/free-codeforces-3628695-3029920.png"
            }
            Platform::Leetcode => {
                "https://upload.wikimedia.org/wikipedia/commons/1/19/LeetCode_logo_black.png"
            }
            Platform::Atcoder => "https://img.atcoder.jp/assets/atcoder.png",
            Platform::Codechef => "https://avatars.githubusercontent.com/u/11960354?v=4",
            Platform::Other => "https://cdn-icons-png.flaticon.com/512/921/921606.png",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A normalized, display-ready calendar event.
///
/// Derived from exactly one listed contest (or one day-slice of one), or
/// from a user-added personal event. Split parts share a base id and carry
/// no `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    /// Event identity, recoverable to the originating contest.
    pub id: EventId,
    /// Contest title.
    pub title: String,
    /// Link to the contest page.
    pub url: String,
    /// Start of this event in machine-local time.
    pub start: DateTime<Local>,
    /// End of this event; absent for split parts.
    pub end: Option<DateTime<Local>>,
    /// Whether the event spans the whole day on the calendar surface.
    pub all_day: bool,
    /// Display color hint (hex).
    pub color: String,
    /// Platform the event belongs to.
    pub platform: Platform,
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, platform={}, start={}",
            self.id, self.title, self.platform, self.start
        )
    }
}

/// Returns the next `limit` events strictly in the future, ordered by start.
pub fn upcoming_events(
    events: &[CalendarEvent],
    now: DateTime<Local>,
    limit: usize,
) -> Vec<CalendarEvent> {
    let mut upcoming: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.start > now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|event| event.start);
    upcoming.truncate(limit);
    upcoming
}
