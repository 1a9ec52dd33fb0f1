use super::daily::DailyTask;
use super::enums::ReminderStatus;
use super::reminder::Reminder;
use crate::time::format_remaining;
use chrono::{DateTime, Duration, Local};

/// Text for the reminder's countdown/alarm column
pub fn reminder_display(reminder: &Reminder, now: &DateTime<Local>) -> String {
    let spec = &reminder.spec;

    if reminder.status == ReminderStatus::Paused {
        if let Some(remaining) = reminder.paused_remaining.filter(|r| *r > Duration::zero()) {
            return if reminder.is_countdown {
                format!("{} (PAUSED {})", spec, format_remaining(remaining))
            } else {
                format!("{} (PAUSED)", spec)
            };
        }
    }

    let Some(target) = reminder.target_time else {
        return spec.clone();
    };

    let remaining = target.signed_duration_since(*now);
    if remaining <= Duration::zero() {
        format!("{} (EXPIRED)", spec)
    } else if reminder.is_countdown {
        format!("{} ({})", spec, format_remaining(remaining))
    } else {
        format!("{} ({})", spec, target.format("%H:%M"))
    }
}

/// Text for the streak column
pub fn streak_display(task: &DailyTask) -> String {
    if task.current_streak > 0 {
        format!("{} days 🔥", task.current_streak)
    } else {
        format!("{} days", task.current_streak)
    }
}

/// Status badge for a daily task
pub fn status_badge(task: &DailyTask) -> &'static str {
    if task.is_done() {
        "✓ DONE"
    } else {
        "INCOMPLETE"
    }
}
