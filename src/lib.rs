//! Temporal engine for a personal dashboard: daily tasks with streaks that
//! reset at 03:00, rolling todos, and countdown/alarm reminders that notify
//! exactly once.

pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod notifications;
pub mod persistence;
pub mod ticker;
pub mod time;
