//! Application module wiring the contest pipeline together.
//!
//! This module provides the main [`App`] implementation that connects the
//! contest directory, the user profile, and the notification surface. It
//! orchestrates the long-running agent (listing refresh plus reminder
//! ticks) and backs the one-shot command-line operations.
//!
//! # Architecture
//!
//! When running as an agent, the app operates with two concurrent tasks:
//!
//! 1. **Contest Sync Task**: Periodically polls the contest directory and
//!    replaces the normalized event snapshot.
//! 2. **Reminder Loop**: Once a minute performs one synchronous pass over
//!    the armed events and delivers every reminder sitting exactly at the
//!    15-minute mark.
//!
//! One-shot operations (toggling alarms and filters, managing personal
//! events, listing upcoming contests, stats lookups) reuse the same
//! components and return after a single interaction.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use log::info;
use tokio::{sync::Mutex, time};

use crate::{
    config::Config,
    contests::{
        ClistRequester, ContestSync, EventId, Platform, Requester, parse_timestamp,
        upcoming_events,
    },
    notify::{DesktopNotifier, Notifier},
    profile::{PersonalEvent, ProfileController, ProfileStore, is_armed},
    scheduler::{TICK_INTERVAL_SECS, due_notifications},
    stats::StatsClient,
};

/// Main application structure tying the pipeline together.
///
/// The `App` owns:
///
/// - a [`ClistRequester`] for one-shot listing lookups
/// - a [`ContestSync`] holding the normalized event snapshot, shared with
///   the background sync task
/// - a [`ProfileController`] owning the user's alarms, filters, personal
///   events, and handles
/// - a [`StatsClient`] for solved-count lookups
///
/// # Thread Safety
///
/// Shared state is wrapped in `Arc<Mutex<_>>`, so the reminder loop never
/// observes a half-updated event snapshot or alarm set.
pub struct App {
    /// Requester used by one-shot listing lookups.
    requester: ClistRequester,
    /// Contest synchronization state, shared with the sync task.
    contest_sync: Arc<Mutex<ContestSync<ClistRequester>>>,
    /// Owner of the live profile snapshot.
    profile_controller: Arc<ProfileController>,
    /// Client for solved-count lookups.
    stats_client: StatsClient,
    /// Seconds between listing refreshes.
    polling_interval: u64,
}

impl App {
    /// Creates the application from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration (directory credentials, intervals).
    /// * `data_dir` - Directory holding the per-user profile documents.
    /// * `user_id` - Name of the profile to load and mutate.
    pub async fn new(config: &Config, data_dir: &str, user_id: &str) -> Self {
        let requester = ClistRequester::new(
            &config.clist.url,
            &config.clist.username,
            &config.clist.api_key,
            config.clist.page_limit,
        );
        let contest_sync = Arc::new(Mutex::new(ContestSync::new(requester.clone())));

        let store = ProfileStore::new(data_dir.to_string());
        let profile_controller = Arc::new(ProfileController::new(store, user_id).await);

        App {
            requester,
            contest_sync,
            profile_controller,
            stats_client: StatsClient::new(&config.stats.gfg_url),
            polling_interval: config.clist.polling_interval,
        }
    }

    /// Runs the agent until the process is terminated.
    ///
    /// Spawns the contest sync task, then drives the reminder loop on the
    /// current task. Each reminder pass is a complete synchronous
    /// comparison over the current snapshots; ticks never overlap. A pass
    /// that lands after an alarm's 15-minute mark (delayed tick, restart)
    /// silently skips it.
    pub async fn start(self) {
        self.start_contest_sync_task();

        let notifier = DesktopNotifier;

        info!("checking alarms every {} seconds", TICK_INTERVAL_SECS);
        let mut interval = time::interval(Duration::from_secs(TICK_INTERVAL_SECS));

        loop {
            interval.tick().await;

            let events = self.contest_sync.lock().await.get_events();
            let profile = self.profile_controller.profile().await;

            for notification in due_notifications(&events, &profile.alarms, Local::now()) {
                info!("delivering reminder: {}", notification);
                notifier.notify(&notification);
            }
        }
    }

    /// Starts the contest synchronization task in the background.
    ///
    /// The task refreshes the event snapshot every `polling_interval`
    /// seconds (including an immediate first refresh) and runs until the
    /// process is terminated.
    fn start_contest_sync_task(&self) {
        let contest_sync = Arc::clone(&self.contest_sync);
        let polling_interval = self.polling_interval;

        tokio::spawn(async move {
            info!(
                "syncing with the contest directory every {} seconds",
                polling_interval
            );
            let mut interval = time::interval(Duration::from_secs(polling_interval));

            loop {
                interval.tick().await;
                contest_sync.lock().await.sync().await;
            }
        });
    }

    /// Toggles the reminder alarm for the contest behind `encoded_id`.
    ///
    /// Accepts either a base id or any split-part id. The alarm entry
    /// records the original contest's title and start as listed by the
    /// directory, regardless of which part was toggled.
    pub async fn toggle_alarm(&self, encoded_id: &str) {
        let event_id = EventId::parse(encoded_id);

        let raw_contests = match self.requester.get_upcoming().await {
            Ok(raw_contests) => raw_contests,
            Err(e) => {
                println!("Could not reach the contest directory: {}", e);
                return;
            }
        };

        let listed = raw_contests.iter().find(|raw| {
            raw.id.map(|id| id.to_string()).as_deref() == Some(event_id.base())
                && raw
                    .resource
                    .as_deref()
                    .and_then(Platform::from_resource)
                    .is_some()
        });
        let Some(raw) = listed else {
            println!(
                "Contest {} is not in the current upcoming listing.",
                event_id.base()
            );
            return;
        };
        let Some(start) = raw.start.as_deref().and_then(parse_timestamp) else {
            println!("Contest {} has no usable start time.", event_id.base());
            return;
        };

        let title = raw.event.clone().unwrap_or_default();
        let armed = self
            .profile_controller
            .toggle_alarm(&event_id, &title, start)
            .await;

        if armed {
            println!("Alarm armed for \"{}\" ({}).", title, start.format("%Y-%m-%d %H:%M"));
        } else {
            println!("Alarm disarmed for \"{}\".", title);
        }
    }

    /// Prints the armed alarms, soonest first.
    pub async fn list_alarms(&self) {
        let profile = self.profile_controller.profile().await;

        if profile.alarms.is_empty() {
            println!("No alarms armed.");
            return;
        }

        let mut alarms: Vec<_> = profile.alarms.iter().cloned().collect();
        alarms.sort_by_key(|entry| entry.start);

        for entry in alarms {
            println!(
                "{}  {}  [{}]",
                entry.start.format("%Y-%m-%d %H:%M"),
                entry.title,
                entry.base_contest_id
            );
        }
    }

    /// Toggles visibility of the platform named by `key`.
    pub async fn toggle_filter(&self, key: &str) {
        let Some(platform) = Platform::from_key(key) else {
            println!("Unknown platform \"{}\".", key);
            return;
        };

        let visible = self.profile_controller.toggle_filter(platform).await;
        println!(
            "Platform {} is now {}.",
            platform,
            if visible { "shown" } else { "hidden" }
        );
    }

    /// Adds a personal event to the calendar surface.
    pub async fn add_personal_event(&self, title: &str, start: &str, all_day: bool) {
        let start = match parse_local_timestamp(start) {
            Ok(start) => start,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        let event = PersonalEvent::new(title, start, all_day);
        println!("Added personal event \"{}\" [{}].", event.title, event.id);
        self.profile_controller.add_personal_event(event).await;
    }

    /// Removes the personal event identified by `event_id`.
    pub async fn remove_personal_event(&self, event_id: &str) {
        self.profile_controller.remove_personal_event(event_id).await;
        println!("Removed personal event {}.", event_id);
    }

    /// Prints the next `limit` visible events, contests and personal
    /// entries alike, marking armed contests.
    pub async fn show_upcoming(&self, limit: usize) {
        self.contest_sync.lock().await.sync().await;

        let events = self.contest_sync.lock().await.get_events();
        let profile = self.profile_controller.profile().await;

        let mut visible = profile.filters.apply(&events);
        visible.extend(
            profile
                .personal_events
                .iter()
                .map(PersonalEvent::to_calendar_event)
                .filter(|event| profile.filters.allows(event.platform)),
        );

        let upcoming = upcoming_events(&visible, Local::now(), limit);
        if upcoming.is_empty() {
            println!("No upcoming events.");
            return;
        }

        for event in upcoming {
            println!(
                "{} {}  {:<10}  {}  [{}]",
                if is_armed(&profile.alarms, &event.id) { "*" } else { " " },
                event.start.format("%Y-%m-%d %H:%M"),
                event.platform.key(),
                event.title,
                event.id
            );
        }
    }

    /// Sets the user's handle for a platform.
    pub async fn set_handle(&self, platform: &str, name: &str) {
        if self.profile_controller.set_handle(platform, name).await {
            println!("Saved {} handle \"{}\".", platform, name);
        } else {
            println!("Unknown platform \"{}\".", platform);
        }
    }

    /// Looks up solved stats for the given handle, falling back to the
    /// stored geeksforgeeks handle.
    pub async fn show_stats(&self, handle: Option<&str>) {
        let stored = self.profile_controller.profile().await.handles.geeksforgeeks;
        let handle = match handle {
            Some(handle) => handle.to_owned(),
            None if !stored.is_empty() => stored,
            None => {
                println!("No geeksforgeeks handle configured; pass one or set it first.");
                return;
            }
        };

        match self.stats_client.get_gfg_stats(&handle).await {
            Ok(stats) => println!(
                "{}: {} problems solved, coding score {}",
                handle, stats.solved, stats.score
            ),
            Err(e) => println!("Stats lookup for {} failed: {}", handle, e),
        }
    }
}

/// Parses a user-entered timestamp as machine-local time.
///
/// Accepts `2026-08-20T18:00:00` and the seconds-less `2026-08-20T18:00`.
fn parse_local_timestamp(value: &str) -> Result<DateTime<Local>, anyhow::Error> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("unrecognized timestamp \"{}\", expected 2026-08-20T18:00", value))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| anyhow!("timestamp \"{}\" does not exist in the local timezone", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_local_timestamp_with_and_without_seconds() {
        let full = parse_local_timestamp("2026-08-20T18:00:30").unwrap();
        assert_eq!(full.second(), 30);

        let short = parse_local_timestamp("2026-08-20T18:00").unwrap();
        assert_eq!(short.hour(), 18);
        assert_eq!(short.second(), 0);
    }

    #[test]
    fn test_parse_local_timestamp_rejects_garbage() {
        assert!(parse_local_timestamp("tomorrow at noon").is_err());
    }
}
