use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

/// Local hour at which one logical day hands over to the next
pub const DAY_CUTOFF_HOUR: u32 = 3;

/// Logical day a timestamp belongs to. Anything before 03:00 counts towards
/// the previous calendar date.
pub fn logical_day(t: &DateTime<Local>) -> NaiveDate {
    let date = t.date_naive();
    if t.hour() < DAY_CUTOFF_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Logical day of `now - 24h`.
///
/// This is deliberately not `logical_day(now) - 1 day`: the rolling window is
/// taken on the timestamp before the label is computed.
pub fn previous_logical_day(now: &DateTime<Local>) -> NaiveDate {
    logical_day(&(*now - Duration::hours(24)))
}

/// Today's 03:00 if `now` is at or past it, otherwise yesterday's 03:00
pub fn most_recent_boundary(now: &DateTime<Local>) -> DateTime<Local> {
    let today = now.date_naive();
    let boundary = local_at(today, DAY_CUTOFF_HOUR, 0);
    if *now >= boundary {
        return boundary;
    }
    local_at(today.pred_opt().unwrap_or(today), DAY_CUTOFF_HOUR, 0)
}

/// Longest clock jump a local time is walked across
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Resolve a wall-clock time on `date` in the local zone
pub(crate) fn local_at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Local> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    resolve_local(&Local, date.and_time(time))
}

/// Map a wall-clock time onto an instant in `tz`.
///
/// Ambiguous times (clocks going back) take the earlier instant; times that
/// do not exist (clocks going forward) take the first whole minute after the
/// gap.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(resolved) = tz.from_local_datetime(&naive).earliest() {
        return resolved;
    }
    (1..=MAX_GAP_MINUTES)
        .filter_map(|m| naive.checked_add_signed(Duration::minutes(m)))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
