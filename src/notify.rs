//! Delivery boundary for contest reminders.
//!
//! This module abstracts the platform notification primitive behind the
//! [`Notifier`] trait and delivers through the desktop notification daemon.

use log::error;
use mockall::automock;
use notify_rust::Notification;

use crate::scheduler::ContestNotification;

/// Trait for delivering a reminder to the user.
///
/// This trait abstracts the notification surface for easier testing with
/// mocks.
#[automock]
pub trait Notifier {
    /// Delivers one reminder. Must not panic or propagate delivery errors.
    fn notify(&self, notification: &ContestNotification);
}

/// Delivers reminders as desktop notifications.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, notification: &ContestNotification) {
        if let Err(e) = Notification::new()
            .summary(&notification.title)
            .body(&notification.body)
            .icon(&notification.icon)
            .appname("AlgoCal")
            .show()
        {
            error!("failed to deliver desktop notification: {}", e);
        }
    }
}
