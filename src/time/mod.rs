pub mod boundary;
pub mod format;
pub mod parse;

pub use boundary::{logical_day, most_recent_boundary, previous_logical_day, DAY_CUTOFF_HOUR};
pub use format::format_remaining;
pub use parse::{parse_alarm_time, parse_countdown, parse_spec, ParsedSpec};
