//! Contest directory integration and normalization pipeline.
//!
//! This module turns raw listings from the clist.by directory into the
//! calendar events the rest of the application consumes.
//!
//! # Modules
//!
//! - `requester` - HTTP client for fetching contest pages from the directory
//! - `response_structs` - Wire structures for directory responses
//! - `structs` - Event identity, platform table, and calendar event structs
//! - `normalizer` - Pure transformation from raw records to calendar events
//! - `sync` - Synchronization logic holding the current event snapshot
//!
//! # Examples
//!
//! ```no_run
//! use algocal::contests::{ClistRequester, ContestSync};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let requester = ClistRequester::new("https://clist.by", "user", "key", 150);
//! let mut sync = ContestSync::new(requester);
//! sync.sync().await;
//! # }
//! ```

mod normalizer;
mod requester;
mod response_structs;
mod structs;
mod sync;

pub use crate::contests::normalizer::{normalize, parse_timestamp};
pub use crate::contests::requester::{ClistRequester, Requester};
pub use crate::contests::response_structs::RawContest;
pub use crate::contests::structs::{CalendarEvent, EventId, Platform, upcoming_events};
pub use crate::contests::sync::ContestSync;
