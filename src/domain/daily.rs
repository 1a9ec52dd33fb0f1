use super::enums::{Priority, TaskStatus};
use crate::time::{logical_day, previous_logical_day};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Result of toggling a daily task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Marked done; carries the streak after the update
    Completed { streak: u32 },
    /// Already completed in the current logical day, streak untouched
    AlreadyDoneToday,
    /// Marked incomplete again
    Reverted,
}

impl Completion {
    /// User-facing status line
    pub fn message(&self) -> String {
        match self {
            Self::Completed { streak } if *streak > 1 => {
                format!("Task marked as DONE! {} day streak!", streak)
            }
            Self::Completed { .. } => "Task marked as DONE!".to_string(),
            Self::AlreadyDoneToday => "Task already completed today".to_string(),
            Self::Reverted => "Task marked as INCOMPLETE".to_string(),
        }
    }
}

/// A recurring task expected once per logical day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    /// Free-text label, never interpreted
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub last_completed: Option<DateTime<Local>>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub best_streak: u32,
}

impl DailyTask {
    pub fn new(
        text: impl Into<String>,
        priority: Priority,
        category: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            priority,
            category: category.into(),
            deadline: deadline.into(),
            status: TaskStatus::Incomplete,
            last_completed: None,
            current_streak: 0,
            best_streak: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Whether the last completion falls in the same logical day as `now`
    pub fn completed_today(&self, now: &DateTime<Local>) -> bool {
        self.last_completed
            .is_some_and(|last| logical_day(&last) == logical_day(now))
    }

    /// Mark the task done at `now`, updating streaks.
    ///
    /// A completion in the current logical day is counted once: repeating it
    /// leaves both streaks as they are.
    pub fn apply_completion(&mut self, now: &DateTime<Local>) -> Completion {
        if self.completed_today(now) {
            self.status = TaskStatus::Done;
            return Completion::AlreadyDoneToday;
        }

        self.current_streak = match self.last_completed {
            None => 1,
            Some(last) if logical_day(&last) == previous_logical_day(now) => {
                self.current_streak.saturating_add(1)
            }
            Some(_) => 1,
        };
        self.best_streak = self.best_streak.max(self.current_streak);
        self.last_completed = Some(*now);
        self.status = TaskStatus::Done;

        debug!(
            task_id = %self.id,
            streak = self.current_streak,
            best = self.best_streak,
            "daily task completed"
        );
        Completion::Completed {
            streak: self.current_streak,
        }
    }

    /// Un-complete the task. Streak counters are left as they are.
    pub fn revert_completion(&mut self) -> Completion {
        self.status = TaskStatus::Incomplete;
        self.last_completed = None;
        debug!(task_id = %self.id, "daily task reverted");
        Completion::Reverted
    }

    /// Flip between DONE and INCOMPLETE
    pub fn toggle(&mut self, now: &DateTime<Local>) -> Completion {
        if self.is_done() {
            self.revert_completion()
        } else {
            self.apply_completion(now)
        }
    }
}
