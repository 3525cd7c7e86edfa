//! Response structures for the contest listing API.
//!
//! This module contains structures for deserializing JSON responses from
//! the clist.by contest directory.

use serde::Deserialize;
use std::fmt;

/// One page of contest listings from `/api/v2/contest/`.
#[derive(Deserialize, Debug)]
pub struct ContestPage {
    /// Raw contest records on this page.
    pub objects: Vec<RawContest>,
}

/// Unprocessed contest record from the listing service.
///
/// Every field is optional at the wire level so that one incomplete record
/// can be dropped on its own instead of failing the whole page. Timestamps
/// arrive as naive UTC strings (`2026-08-10T17:35:00`).
#[derive(Deserialize, Debug, Clone)]
pub struct RawContest {
    /// Source-assigned identifier, stable across fetches.
    #[serde(default)]
    pub id: Option<i64>,
    /// Platform domain the contest runs on.
    #[serde(default)]
    pub resource: Option<String>,
    /// Contest title.
    #[serde(default)]
    pub event: Option<String>,
    /// Link to the contest page.
    #[serde(default)]
    pub href: Option<String>,
    /// Start timestamp.
    #[serde(default)]
    pub start: Option<String>,
    /// End timestamp, at or after `start` when well-formed.
    #[serde(default)]
    pub end: Option<String>,
}

impl fmt::Display for RawContest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={:?}, resource={:?}, event={:?}, start={:?}, end={:?}",
            self.id, self.resource, self.event, self.start, self.end
        )
    }
}
