//! Solved-count lookups against the community GFG stats API.
//!
//! This module provides the [`StatsClient`] for fetching a user's solved
//! problem count and coding score by handle. The lookup is opaque: it either
//! produces a [`SolvedStats`] pair or fails with a [`StatsError`].

use std::fmt;

use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

/// Solved-problem statistics for one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolvedStats {
    /// Total problems solved.
    pub solved: u32,
    /// Platform coding score.
    pub score: u32,
}

/// Errors from a stats lookup.
#[derive(Debug)]
pub enum StatsError {
    /// Transport, status, or decode failure.
    Http(reqwest::Error),
    /// The API answered but knows no such handle.
    NotFound,
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsError::Http(e) => write!(f, "stats request failed: {}", e),
            StatsError::NotFound => write!(f, "handle not found"),
        }
    }
}

impl std::error::Error for StatsError {}

impl From<reqwest::Error> for StatsError {
    fn from(e: reqwest::Error) -> Self {
        StatsError::Http(e)
    }
}

/// A numeric field the API serves either as a number or as a string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum NumberOrString {
    Number(u32),
    Text(String),
}

impl NumberOrString {
    /// Coerces to a number, treating non-numeric text as zero.
    fn as_u32(&self) -> u32 {
        match self {
            NumberOrString::Number(n) => *n,
            NumberOrString::Text(s) => s.parse().unwrap_or(0),
        }
    }
}

/// Response from `/api?username={handle}`.
#[derive(Deserialize, Debug)]
struct GfgResponse {
    /// Absent when the handle is unknown.
    #[serde(default)]
    info: Option<GfgInfo>,
}

#[derive(Deserialize, Debug)]
struct GfgInfo {
    #[serde(default, rename = "totalProblemsSolved")]
    total_problems_solved: Option<NumberOrString>,
    #[serde(default, rename = "codingScore")]
    coding_score: Option<NumberOrString>,
}

/// HTTP client for the community GFG stats API.
///
/// # Examples
///
/// ```no_run
/// use algocal::stats::StatsClient;
///
/// # #[tokio::main]
/// # async fn main() {
/// let client = StatsClient::new("https://gfg-stats.vercel.app");
/// match client.get_gfg_stats("gfg_user").await {
///     Ok(stats) => println!("solved {} (score {})", stats.solved, stats.score),
///     Err(e) => println!("lookup failed: {}", e),
/// }
/// # }
/// ```
pub struct StatsClient {
    /// Base URL of the stats API.
    url: String,
    /// HTTP client
    client: Client,
}

impl StatsClient {
    /// Create a new [StatsClient] for the given base URL.
    pub fn new(url: &str) -> Self {
        StatsClient {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Request `/api?username={handle}` for the handle's statistics.
    ///
    /// The API wraps its payload in an `info` object and is loose about
    /// numeric types, so both `"412"` and `412` are accepted. A response
    /// without `info` maps to [`StatsError::NotFound`].
    pub async fn get_gfg_stats(&self, handle: &str) -> Result<SolvedStats, StatsError> {
        let url = format!("{}/api", &self.url);
        info!("request gfg stats for handle {}", handle);
        debug!("request {}?username={}", &url, handle);

        let response: GfgResponse = self
            .client
            .get(&url)
            .query(&[("username", handle)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(stats_info) = response.info else {
            return Err(StatsError::NotFound);
        };

        Ok(SolvedStats {
            solved: stats_info
                .total_problems_solved
                .map(|n| n.as_u32())
                .unwrap_or(0),
            score: stats_info.coding_score.map(|n| n.as_u32()).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_gfg_stats() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"info": {"totalProblemsSolved": 412, "codingScore": 1280}}"#;

        server
            .mock("GET", "/api")
            .match_query(mockito::Matcher::UrlEncoded(
                "username".to_owned(),
                "gfg_user".to_owned(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = StatsClient::new(&server.url());
        let stats = client.get_gfg_stats("gfg_user").await.unwrap();

        assert_eq!(stats, SolvedStats { solved: 412, score: 1280 });
    }

    #[tokio::test]
    async fn test_get_gfg_stats_coerces_strings() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"info": {"totalProblemsSolved": "412", "codingScore": "1280"}}"#;

        server
            .mock("GET", "/api")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = StatsClient::new(&server.url());
        let stats = client.get_gfg_stats("gfg_user").await.unwrap();

        assert_eq!(stats.solved, 412);
        assert_eq!(stats.score, 1280);
    }

    #[tokio::test]
    async fn test_get_gfg_stats_missing_info_is_not_found() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "user not found"}"#)
            .create_async()
            .await;

        let client = StatsClient::new(&server.url());

        assert!(matches!(
            client.get_gfg_stats("nobody").await,
            Err(StatsError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_gfg_stats_missing_fields_default_to_zero() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"info": {}}"#)
            .create_async()
            .await;

        let client = StatsClient::new(&server.url());
        let stats = client.get_gfg_stats("gfg_user").await.unwrap();

        assert_eq!(stats, SolvedStats { solved: 0, score: 0 });
    }

    #[tokio::test]
    async fn test_get_gfg_stats_upstream_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/api")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = StatsClient::new(&server.url());

        assert!(matches!(
            client.get_gfg_stats("gfg_user").await,
            Err(StatsError::Http(_))
        ));
    }
}
