//! Contest normalization pipeline.
//!
//! This module turns raw listing records into display-ready
//! [`CalendarEvent`]s: it drops malformed records, excludes contests from
//! platforms outside the allowed set, and splits contests longer than a day
//! into one noon-anchored event per touched calendar day.
//!
//! The transform is a pure function of its input; it never consults the
//! wall clock, so the same page always normalizes to the same events.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};

use crate::contests::response_structs::RawContest;
use crate::contests::structs::{CalendarEvent, EventId, Platform};

/// Contests longer than this are split into one event per calendar day.
const SPLIT_THRESHOLD_HOURS: i64 = 24;

/// Normalizes one page of raw contest records into calendar events.
///
/// Rules, applied per record:
///
/// 1. Records missing `resource`, `id`, `start`, or `end` (or whose
///    timestamps fail to parse) are dropped individually; one bad record
///    never aborts the batch.
/// 2. Records whose resource is outside the allowed platform set produce no
///    events. This is a deliberate exclusion, not a fallback into
///    [`Platform::Other`].
/// 3. A contest of up to 24 hours (inclusive) becomes exactly one event
///    whose id is the contest id.
/// 4. A longer contest is split: one event per touched calendar day, each
///    anchored at 12:00 local time with id `"{id}_part{k}"` and no end.
///
/// # Examples
///
/// ```
/// use algocal::contests::normalize;
///
/// let events = normalize(vec![]);
/// assert!(events.is_empty());
/// ```
pub fn normalize(raw_contests: Vec<RawContest>) -> Vec<CalendarEvent> {
    raw_contests.into_iter().flat_map(normalize_contest).collect()
}

/// Normalizes a single record into zero, one, or several events.
fn normalize_contest(raw: RawContest) -> Vec<CalendarEvent> {
    let Some(resource) = raw.resource.clone() else {
        warn!("dropping contest record without resource: {}", raw);
        return vec![];
    };
    let Some(platform) = Platform::from_resource(&resource) else {
        debug!("excluding contest on resource {}", resource);
        return vec![];
    };
    let Some(id) = raw.id else {
        warn!("dropping contest record without id: {}", raw);
        return vec![];
    };
    let (Some(start_raw), Some(end_raw)) = (raw.start.as_deref(), raw.end.as_deref()) else {
        warn!("dropping contest record without timestamps: {}", raw);
        return vec![];
    };
    let (Some(start), Some(end)) = (parse_timestamp(start_raw), parse_timestamp(end_raw)) else {
        warn!("dropping contest record with unparseable timestamps: {}", raw);
        return vec![];
    };

    let title = raw.event.unwrap_or_default();
    let url = raw.href.unwrap_or_default();

    if end - start > Duration::hours(SPLIT_THRESHOLD_HOURS) {
        split_multi_day(id, &title, &url, platform, start, end)
    } else {
        vec![CalendarEvent {
            id: EventId::single(id.to_string()),
            title,
            url,
            start,
            end: Some(end),
            all_day: false,
            color: platform.color().to_string(),
            platform,
        }]
    }
}

/// Splits a multi-day contest into one event per touched calendar day.
///
/// The walk steps a full day at a time from `start` while it stays strictly
/// before `end`, so day `k` exists exactly when `start + k·24h < end`. Each
/// emitted part starts at that day's local noon.
///
/// The walk always terminates, and a range that never admits a step (for
/// instance an inverted `end < start` slipping through classification)
/// still emits exactly one part rather than none.
fn split_multi_day(
    id: i64,
    title: &str,
    url: &str,
    platform: Platform,
    start: DateTime<Local>,
    end: DateTime<Local>,
) -> Vec<CalendarEvent> {
    let mut parts = Vec::new();
    let mut current = start;
    let mut day_index: u32 = 0;

    while current < end {
        parts.push(day_part(id, title, url, platform, current, day_index));
        let Some(next) = current.checked_add_signed(Duration::days(1)) else {
            break;
        };
        current = next;
        day_index += 1;
    }

    if parts.is_empty() {
        parts.push(day_part(id, title, url, platform, start, 0));
    }

    parts
}

/// Builds the event for one day-slice, anchored at local noon.
fn day_part(
    id: i64,
    title: &str,
    url: &str,
    platform: Platform,
    day: DateTime<Local>,
    index: u32,
) -> CalendarEvent {
    // Noon can be ambiguous or missing across a DST transition; fall back
    // to the walk position itself in that case.
    let start = day
        .date_naive()
        .and_hms_opt(12, 0, 0)
        .and_then(|noon| Local.from_local_datetime(&noon).earliest())
        .unwrap_or(day);

    CalendarEvent {
        id: EventId::part(id.to_string(), index),
        title: title.to_owned(),
        url: url.to_owned(),
        start,
        end: None,
        all_day: false,
        color: platform.color().to_string(),
        platform,
    }
}

/// Parses a listing timestamp into local time.
///
/// The directory serves naive UTC strings (`2026-08-10T17:35:00`); offsets
/// are accepted too when present.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&Local))
}
