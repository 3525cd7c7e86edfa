//! Contest listing synchronization.
//!
//! This module provides the [`ContestSync`] struct that manages periodic
//! synchronization with the contest directory, keeping a normalized snapshot
//! of upcoming calendar events.

use log::{error, info};

use crate::contests::normalizer::normalize;
use crate::contests::requester::Requester;
use crate::contests::structs::CalendarEvent;

/// Manages synchronization of the calendar event snapshot with the contest
/// directory.
///
/// [`ContestSync`] fetches one page of upcoming contests through a
/// [`Requester`] implementation and replaces its internal event snapshot
/// with the normalized result. A failed fetch is treated as an empty page:
/// the snapshot is replaced wholesale, never left half-updated.
///
/// # Examples
///
/// ```no_run
/// use algocal::contests::{ClistRequester, ContestSync};
///
/// # #[tokio::main]
/// # async fn main() {
/// let requester = ClistRequester::new("https://clist.by", "user", "key", 150);
/// let mut sync = ContestSync::new(requester);
/// sync.sync().await;
/// println!("{} events", sync.get_events().len());
/// # }
/// ```
pub struct ContestSync<R: Requester> {
    /// Requester used to reach the contest directory.
    requester: R,
    /// Current normalized event snapshot.
    events: Vec<CalendarEvent>,
}

impl<R: Requester> ContestSync<R> {
    /// Create a new [ContestSync] with an empty event snapshot.
    pub fn new(requester: R) -> Self {
        ContestSync {
            requester,
            events: Vec::new(),
        }
    }

    /// Fetches the upcoming contest page and replaces the event snapshot.
    ///
    /// On a fetch failure the error is logged and an empty batch is
    /// normalized instead, so consumers always observe a complete snapshot.
    ///
    /// This should be called periodically to keep the snapshot current.
    pub async fn sync(&mut self) {
        info!("request contests from listing service");

        let raw_contests = match self.requester.get_upcoming().await {
            Ok(raw_contests) => raw_contests,
            Err(e) => {
                error!("error while requesting contests: {}", e);
                vec![]
            }
        };

        self.events = normalize(raw_contests);

        info!("synced {} calendar events", self.events.len());
    }

    /// Returns a clone of the current event snapshot.
    pub fn get_events(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::requester::{ClistRequester, MockRequester};
    use crate::contests::response_structs::RawContest;
    use crate::contests::structs::EventId;

    fn create_raw(id: i64, resource: &str) -> RawContest {
        RawContest {
            id: Some(id),
            resource: Some(resource.to_string()),
            event: Some(format!("Contest {}", id)),
            href: Some(format!("https://{}/contest/{}", resource, id)),
            start: Some("2026-08-10T17:35:00".to_string()),
            end: Some("2026-08-10T19:35:00".to_string()),
        }
    }

    #[tokio::test]
    async fn test_sync_populates_events() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_upcoming()
            .times(1)
            .returning(|| Ok(vec![create_raw(7, "codeforces.com"), create_raw(8, "atcoder.jp")]));

        let mut sync = ContestSync::new(mock_requester);
        sync.sync().await;

        let events = sync.get_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::single("7"));
        assert_eq!(events[1].id, EventId::single("8"));
    }

    #[tokio::test]
    async fn test_sync_replaces_previous_snapshot() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_upcoming()
            .times(1)
            .returning(|| Ok(vec![create_raw(7, "codeforces.com")]));
        mock_requester
            .expect_get_upcoming()
            .times(1)
            .returning(|| Ok(vec![create_raw(9, "leetcode.com")]));

        let mut sync = ContestSync::new(mock_requester);
        sync.sync().await;
        sync.sync().await;

        let events = sync.get_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, EventId::single("9"));
    }

    #[tokio::test]
    async fn test_sync_filters_excluded_resources() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_upcoming()
            .times(1)
            .returning(|| Ok(vec![create_raw(7, "topcoder.com")]));

        let mut sync = ContestSync::new(mock_requester);
        sync.sync().await;

        assert!(sync.get_events().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_snapshot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/contest/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let requester = ClistRequester::new(&server.url(), "tourist", "abcd", 150);
        let mut sync = ContestSync::new(requester);
        sync.sync().await;

        assert!(sync.get_events().is_empty());
    }
}
