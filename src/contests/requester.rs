//! HTTP client for the clist.by contest directory API.
//!
//! This module provides the [`ClistRequester`] struct for fetching one
//! bounded page of upcoming contests from the listing service.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Error};

use crate::contests::response_structs::{ContestPage, RawContest};

/// HTTP client for requesting contest listings.
///
/// # Examples
///
/// ```no_run
/// let requester = ClistRequester::new("https://clist.by", "user", "key", 150);
/// let contests = requester.get_upcoming().await.unwrap();
/// println!("Contests: {:?}", contests);
/// ```
#[derive(Clone)]
pub struct ClistRequester {
    /// Base URL of the listing service.
    url: String,
    /// Directory account username.
    username: String,
    /// Directory API key tied to the username.
    api_key: String,
    /// Maximum number of records per fetched page.
    page_limit: u32,
    /// HTTP client
    client: Client,
}

/// Trait for fetching contest listings.
///
/// This trait abstracts the HTTP operation for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches one page of upcoming contests.
    ///
    /// The fetch is all-or-nothing: any transport, status, or decode error
    /// yields `Err`, never a partial page.
    async fn get_upcoming(&self) -> Result<Vec<RawContest>, Error>;
}

impl ClistRequester {
    /// Create a new [ClistRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the listing service.
    /// * `username` - Directory account username.
    /// * `api_key` - API key for that account.
    /// * `page_limit` - Maximum records to request per page.
    pub fn new(url: &str, username: &str, api_key: &str, page_limit: u32) -> Self {
        ClistRequester {
            url: url.to_string(),
            username: username.to_string(),
            api_key: api_key.to_string(),
            page_limit,
            client: reqwest::Client::new(),
        }
    }
}

impl Requester for ClistRequester {
    /// Request `/api/v2/contest/` for the upcoming contest page.
    ///
    /// The listing responds with a json object carrying the page records:
    /// ```
    /// {
    ///   "objects": [
    ///     { "id": 7, "resource": "codeforces.com", "event": "...",
    ///       "href": "...", "start": "...", "end": "..." }
    ///   ]
    /// }
    /// ```
    /// This method transforms that json into a [`RawContest`] vector,
    /// requesting only upcoming contests ordered by start time.
    async fn get_upcoming(&self) -> Result<Vec<RawContest>, Error> {
        let url = format!("{}/api/v2/contest/", &self.url);
        let limit = self.page_limit.to_string();
        info!("request upcoming contest page");
        debug!("request {}?upcoming=true&limit={}", &url, &limit);

        let page: ContestPage = self
            .client
            .get(&url)
            .query(&[
                ("username", self.username.as_str()),
                ("api_key", self.api_key.as_str()),
                ("upcoming", "true"),
                ("order_by", "start"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {} records", &url, page.objects.len());

        Ok(page.objects)
    }
}
