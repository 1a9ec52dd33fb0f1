use super::boundary::local_at;
use chrono::{DateTime, Duration, Local, NaiveTime, Timelike};

/// Countdown suffixes and their length in seconds. Longer suffixes come
/// first so "5min" is never read as "5mi" minutes.
const COUNTDOWN_UNITS: &[(&str, i64)] = &[
    ("min", 60),
    ("hr", 60 * 60),
    ("sec", 1),
    ("d", 24 * 60 * 60),
    ("w", 7 * 24 * 60 * 60),
    ("m", 60),
    ("h", 60 * 60),
    ("s", 1),
];

const TWELVE_HOUR_FORMATS: &[&str] = &["%I:%M%p", "%I:%M %p"];
const TWENTY_FOUR_HOUR_FORMAT: &str = "%H:%M";

/// A reminder spec resolved into an absolute target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSpec {
    pub target: DateTime<Local>,
    pub is_countdown: bool,
}

/// Resolve a relative duration like "5d", "2w", "30m", "1hr" or "45sec"
/// into `now + duration`
pub fn parse_countdown(spec: &str, now: &DateTime<Local>) -> Option<DateTime<Local>> {
    let spec = spec.trim();
    COUNTDOWN_UNITS.iter().find_map(|(suffix, unit_secs)| {
        let amount: i64 = spec.strip_suffix(suffix)?.parse().ok()?;
        let offset = Duration::try_seconds(amount.checked_mul(*unit_secs)?)?;
        now.checked_add_signed(offset)
    })
}

/// Resolve a wall-clock time ("1:50PM", "1:50 pm", "15:04") to its next
/// occurrence. A time already past today is moved 24 hours ahead.
pub fn parse_alarm_time(spec: &str, now: &DateTime<Local>) -> Option<DateTime<Local>> {
    let spec = spec.trim();
    let time = TWELVE_HOUR_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(spec, format).ok())
        .or_else(|| NaiveTime::parse_from_str(spec, TWENTY_FOUR_HOUR_FORMAT).ok())?;

    let alarm = local_at(now.date_naive(), time.hour(), time.minute());
    if alarm < *now {
        return alarm.checked_add_signed(Duration::hours(24));
    }
    Some(alarm)
}

/// Try the countdown form first, then the alarm form
pub fn parse_spec(spec: &str, now: &DateTime<Local>) -> Option<ParsedSpec> {
    if let Some(target) = parse_countdown(spec, now) {
        return Some(ParsedSpec {
            target,
            is_countdown: true,
        });
    }
    parse_alarm_time(spec, now).map(|target| ParsedSpec {
        target,
        is_countdown: false,
    })
}
