//! Notification sink for expired reminders.
//!
//! The engine only produces [`ReminderFired`] events. Delivering them (desktop
//! popups, sound) happens behind [`Notifier`] and must never block the tick.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{info, warn};
use uuid::Uuid;

/// A reminder reached its target and should be announced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderFired {
    pub reminder_id: Uuid,
    pub label: String,
    pub note: String,
    pub fired_at: DateTime<Local>,
}

impl ReminderFired {
    pub fn title(&self) -> &'static str {
        "Reminder"
    }

    /// Label, followed by the note when there is one
    pub fn body(&self) -> String {
        if self.note.trim().is_empty() {
            self.label.clone()
        } else {
            format!("{} - {}", self.label, self.note)
        }
    }
}

/// Receives fire events. Implementations must return promptly.
pub trait Notifier {
    fn notify(&self, event: &ReminderFired);
}

/// Writes each event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &ReminderFired) {
        info!(
            reminder_id = %event.reminder_id,
            fired_at = %event.fired_at,
            "{}: {}",
            event.title(),
            event.body()
        );
    }
}

/// Hands events to another thread over a channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<ReminderFired>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, Receiver<ReminderFired>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: &ReminderFired) {
        if self.sender.send(event.clone()).is_err() {
            warn!(reminder_id = %event.reminder_id, "notification receiver gone, event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(note: &str) -> ReminderFired {
        ReminderFired {
            reminder_id: Uuid::new_v4(),
            label: "tea".to_string(),
            note: note.to_string(),
            fired_at: Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().unwrap(),
        }
    }

    #[test]
    fn test_body_includes_note() {
        assert_eq!(event("").body(), "tea");
        assert_eq!(event("green").body(), "tea - green");
    }

    #[test]
    fn test_channel_notifier_delivers() {
        let (notifier, receiver) = ChannelNotifier::new();
        let fired = event("green");
        notifier.notify(&fired);
        assert_eq!(receiver.try_recv().unwrap(), fired);
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify(&event(""));
    }
}
