//! Configuration file structures for the agent.
//!
//! This module defines the configuration file format using YAML, with
//! environment variable overrides. The configuration is split into two
//! sections: contest directory settings and stats lookup settings.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Contest directory configuration
//! clist:
//!   # Base URL of the contest directory
//!   url: "https://clist.by"
//!
//!   # Directory account username
//!   username: "your-username"
//!
//!   # API key tied to the username
//!   api_key: "your-api-key"
//!
//!   # Polling interval in seconds (how often to refresh the listing)
//!   polling_interval: 900
//!
//!   # Maximum records per fetched page
//!   page_limit: 150
//!
//! # Stats lookup configuration (optional)
//! stats:
//!   gfg_url: "https://gfg-stats.vercel.app"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any value can be overridden with an `ALGOCAL_` prefixed variable, using
//! `__` as the section separator:
//!
//! ```bash
//! export ALGOCAL_CLIST__USERNAME="your-username"
//! export ALGOCAL_CLIST__API_KEY="your-api-key"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure for the agent.
#[derive(Deserialize)]
pub struct Config {
    /// Contest directory configuration
    pub clist: Clist,
    /// Stats lookup configuration
    #[serde(default)]
    pub stats: Stats,
}

/// Contest directory configuration.
///
/// Contains all settings required to fetch the upcoming contest page.
///
/// # YAML Section
///
/// ```yaml
/// clist:
///   url: "https://clist.by"
///   username: "your-username"
///   api_key: "your-api-key"
///   polling_interval: 900
///   page_limit: 150
/// ```
#[derive(Deserialize)]
pub struct Clist {
    /// Base URL of the contest directory.
    ///
    /// Should include the protocol (http/https) but not trailing slashes.
    pub url: String,

    /// Directory account username.
    pub username: String,

    /// API key for the account.
    ///
    /// Issued by the directory; paired with the username on every request.
    pub api_key: String,

    /// Polling interval in seconds.
    ///
    /// How frequently the agent refreshes the contest listing.
    #[serde(default = "default_polling_interval")]
    pub polling_interval: u64,

    /// Maximum number of records per fetched page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

/// Stats lookup configuration.
///
/// # YAML Section
///
/// ```yaml
/// stats:
///   gfg_url: "https://gfg-stats.vercel.app"
/// ```
#[derive(Deserialize)]
pub struct Stats {
    /// Base URL of the community GFG stats API.
    #[serde(default = "default_gfg_url")]
    pub gfg_url: String,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            gfg_url: default_gfg_url(),
        }
    }
}

fn default_polling_interval() -> u64 {
    900
}

fn default_page_limit() -> u32 {
    150
}

fn default_gfg_url() -> String {
    "https://gfg-stats.vercel.app".to_string()
}

impl Config {
    /// Loads the configuration from a YAML file, applying `ALGOCAL_`
    /// environment variable overrides on top.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ALGOCAL_").split("__"))
            .extract()
    }
}
