pub mod daily;
pub mod enums;
pub mod reminder;
pub mod todo;
pub mod views;

pub use daily::{Completion, DailyTask};
pub use enums::{Priority, ReminderStatus, TaskStatus};
pub use reminder::{Reminder, Transition};
pub use todo::RollingTodo;
pub use views::{reminder_display, status_badge, streak_display};
