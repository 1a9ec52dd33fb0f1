//! Per-tick passes over the task and reminder collections.
//!
//! Both passes mutate the records they are handed and report what changed;
//! persisting and delivering notifications is left to the caller.

use crate::domain::{DailyTask, Reminder, TaskStatus};
use crate::notifications::ReminderFired;
use crate::time::{logical_day, most_recent_boundary, previous_logical_day};
use chrono::{DateTime, Local};
use tracing::info;

/// Un-tick tasks completed before the latest 03:00 boundary and zero out
/// streaks that were not kept up. Returns true when any task changed.
///
/// Safe to run on every tick: a second call with the same `now` changes nothing.
pub fn sweep(tasks: &mut [DailyTask], now: &DateTime<Local>) -> bool {
    let boundary = most_recent_boundary(now);
    let today = logical_day(now);
    let yesterday = previous_logical_day(now);
    let mut changed = false;

    for task in tasks.iter_mut() {
        let stale = task.last_completed.map_or(true, |last| last < boundary);
        if task.status == TaskStatus::Done && stale {
            task.status = TaskStatus::Incomplete;
            task.last_completed = None;
            info!(task_id = %task.id, "daily task reset for new day");
            changed = true;
        }

        if task.current_streak == 0 {
            continue;
        }
        if let Some(last) = task.last_completed {
            let day = logical_day(&last);
            if day != today && day != yesterday {
                info!(task_id = %task.id, lost = task.current_streak, "streak lapsed");
                task.current_streak = 0;
                changed = true;
            }
        }
    }

    changed
}

/// Expire every active reminder whose target has been reached and collect
/// one notification per newly expired reminder
pub fn check_expiry(reminders: &mut [Reminder], now: &DateTime<Local>) -> Vec<ReminderFired> {
    reminders
        .iter_mut()
        .filter_map(|reminder| reminder.expire_if_due(now))
        .collect()
}
