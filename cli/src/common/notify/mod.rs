//! # SoftSell Notifications (`common::notify`)
//!
//! File: cli/src/common/notify/mod.rs
//!
//! ## Overview
//!
//! Toast-style user notifications. Senders fire and forget; nothing is returned.
//!
//! - `ConsoleNotifier`: success to stdout, errors to stderr.
//! - `CollectingNotifier`: keeps notifications in memory so a caller can relay
//!   them elsewhere (the site API returns them in the response body).
//!
use serde::Serialize;
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A notification as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => {
                info!("Notify (success): {}", message);
                println!("✅ {}", message);
            }
            NotificationKind::Error => {
                warn!("Notify (error): {}", message);
                eprintln!("❌ {}", message);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CollectingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let notification = Notification {
            kind,
            message: message.to_string(),
        };
        match self.received.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_notifier_keeps_order() {
        let notifier = CollectingNotifier::new();
        assert!(notifier.last().is_none());

        notifier.notify(NotificationKind::Error, "first");
        notifier.notify(NotificationKind::Success, "second");

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].kind, NotificationKind::Error);
        assert_eq!(notifier.last().unwrap().message, "second");
    }

    #[test]
    fn test_notification_serializes_lowercase_kind() {
        let json = serde_json::to_value(Notification {
            kind: NotificationKind::Success,
            message: "ok".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "success");
    }

    #[test]
    fn test_console_notifier_does_not_panic() {
        ConsoleNotifier.notify(NotificationKind::Success, "saved");
        ConsoleNotifier.notify(NotificationKind::Error, "failed");
    }
}
