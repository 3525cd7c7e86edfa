//! AlgoCal - a contest calendar agent with reminder alarms.
//!
//! # Overview
//!
//! AlgoCal aggregates upcoming competitive-programming contests from the
//! clist.by directory, normalizes them into calendar events, and delivers a
//! desktop notification 15 minutes before any contest the user armed an
//! alarm for.
//!
//! # Features
//!
//! - **Contest Calendar**: Upcoming contests from codeforces, leetcode,
//!   atcoder, and codechef, with multi-day contests split into one entry
//!   per day
//! - **Reminder Alarms**: Toggleable per-contest alarms delivered as
//!   desktop notifications
//! - **Platform Filters**: Per-platform visibility toggles
//! - **Personal Events**: User-authored entries on the same calendar
//! - **Solved Stats**: Solved-count lookup for a stored GFG handle
//! - **YAML Configuration**: Simple configuration file with environment
//!   variable overrides
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! clist:
//!   url: "https://clist.by"
//!   username: "your-username"
//!   api_key: "your-api-key"
//!   polling_interval: 900
//! ```
//!
//! Credentials can also come from the environment:
//!
//! ```bash
//! export ALGOCAL_CLIST__USERNAME="your-username"
//! export ALGOCAL_CLIST__API_KEY="your-api-key"
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Run the agent (sync loop + reminder ticks)
//! algocal --config config.yaml --data ./data
//!
//! # One-shot operations
//! algocal --config config.yaml --data ./data upcoming
//! algocal --config config.yaml --data ./data alarm 42
//! algocal --config config.yaml --data ./data filter codechef
//! ```
//!
//! # Architecture
//!
//! The agent consists of several modules:
//!
//! - [`contests`] - Directory client, normalization pipeline, and event sync
//! - [`profile`] - Alarms, filters, personal events, handles, persistence
//! - [`scheduler`] - The once-a-minute reminder pass
//! - [`notify`] - Desktop notification delivery
//! - [`stats`] - Solved-count lookups
//! - [`config`] - YAML configuration with environment overrides
//! - [`app`] - Composition root wiring the above together
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use crate::{app::App, config::Config};

mod app;
mod config;
mod contests;
mod notify;
mod profile;
mod scheduler;
mod stats;

/// Command-line arguments for the agent.
///
/// Without a subcommand the agent runs until terminated, keeping the
/// contest listing fresh and delivering reminders. Subcommands perform a
/// single operation against the same profile and exit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format. Values can be
    /// overridden with `ALGOCAL_` environment variables.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing per-user profile data.
    #[arg(short, long)]
    data: String,

    /// Name of the profile to operate on.
    #[arg(short, long, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Option<Command>,
}

/// One-shot operations against the profile and the contest listing.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the agent: keep the listing synced and deliver reminders.
    Run,
    /// Toggle the reminder alarm for a contest (base or part id).
    Alarm { event_id: String },
    /// List armed alarms.
    Alarms,
    /// Toggle visibility of a platform (codeforces, leetcode, atcoder,
    /// codechef, other).
    Filter { platform: String },
    /// Add a personal event at a local time like 2026-08-20T18:00.
    AddEvent {
        title: String,
        start: String,
        #[arg(long)]
        all_day: bool,
    },
    /// Remove a personal event by id.
    RemoveEvent { event_id: String },
    /// Show the next upcoming visible events.
    Upcoming {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Store a platform handle for stats lookups.
    Handle { platform: String, name: String },
    /// Look up solved stats for a GFG handle (stored one by default).
    Stats { handle: Option<String> },
}

/// Main entry point for the agent.
///
/// Initializes logging (`RUST_LOG`, default `info`), parses arguments,
/// loads the configuration with environment overrides, and either starts
/// the long-running agent or executes one subcommand.
///
/// Configuration errors are logged and terminate the process cleanly;
/// runtime errors inside the agent are logged and survived.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting algocal {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file with environment variable overrides
    let mut config: Config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Normalize service URLs by removing trailing slashes if present
    if config.clist.url.ends_with('/') {
        config.clist.url.pop();
    }
    if config.stats.gfg_url.ends_with('/') {
        config.stats.gfg_url.pop();
    }

    let app = App::new(&config, &args.data, &args.user).await;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => app.start().await,
        Command::Alarm { event_id } => app.toggle_alarm(&event_id).await,
        Command::Alarms => app.list_alarms().await,
        Command::Filter { platform } => app.toggle_filter(&platform).await,
        Command::AddEvent {
            title,
            start,
            all_day,
        } => app.add_personal_event(&title, &start, all_day).await,
        Command::RemoveEvent { event_id } => app.remove_personal_event(&event_id).await,
        Command::Upcoming { limit } => app.show_upcoming(limit).await,
        Command::Handle { platform, name } => app.set_handle(&platform, &name).await,
        Command::Stats { handle } => app.show_stats(handle.as_deref()).await,
    }
}
