use chrono::Duration;

/// Above this many hours the precise clock form gives way to rounded hours/days
const PRECISE_LIMIT_HOURS: i64 = 8;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Render a remaining duration for display.
///
/// Up to 8h the value is shown precisely ("1h5m30s", "45s"). Longer values are
/// rounded to the nearest hour first and only then split into days and hours
/// ("9 hours", "1 day", "1 day 1h", "2d 3h").
pub fn format_remaining(d: Duration) -> String {
    if d <= Duration::hours(PRECISE_LIMIT_HOURS) {
        return format_clock(d);
    }

    let hours = round_to_hours(d);
    if hours >= 24 {
        let days = hours / 24;
        let remainder = hours % 24;
        return match (days, remainder) {
            (1, 0) => "1 day".to_string(),
            (_, 0) => format!("{} days", days),
            (1, _) => format!("1 day {}h", remainder),
            _ => format!("{}d {}h", days, remainder),
        };
    }

    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    }
}

/// Nearest whole hour for a positive duration, halves rounding up
fn round_to_hours(d: Duration) -> i64 {
    d.num_milliseconds().saturating_add(MILLIS_PER_HOUR / 2) / MILLIS_PER_HOUR
}

/// Compact clock form truncated to whole seconds ("2h0m5s", "1m30s", "0s")
fn format_clock(d: Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_durations_are_precise() {
        assert_eq!(format_remaining(Duration::seconds(90)), "1m30s");
        assert_eq!(format_remaining(Duration::seconds(45)), "45s");
        assert_eq!(format_remaining(Duration::zero()), "0s");
        assert_eq!(
            format_remaining(Duration::hours(2) + Duration::seconds(5)),
            "2h0m5s"
        );
    }

    #[test]
    fn test_sub_second_precision_is_truncated() {
        assert_eq!(format_remaining(Duration::milliseconds(90_999)), "1m30s");
    }

    #[test]
    fn test_exactly_eight_hours_stays_precise() {
        assert_eq!(format_remaining(Duration::hours(8)), "8h0m0s");
    }

    #[test]
    fn test_long_durations_round_to_hours() {
        assert_eq!(format_remaining(Duration::hours(9)), "9 hours");
        assert_eq!(
            format_remaining(Duration::hours(9) + Duration::minutes(29)),
            "9 hours"
        );
        assert_eq!(
            format_remaining(Duration::hours(9) + Duration::minutes(30)),
            "10 hours"
        );
    }

    #[test]
    fn test_days_with_and_without_remainder() {
        assert_eq!(format_remaining(Duration::hours(24)), "1 day");
        assert_eq!(format_remaining(Duration::hours(25)), "1 day 1h");
        assert_eq!(format_remaining(Duration::hours(48)), "2 days");
        assert_eq!(format_remaining(Duration::hours(51)), "2d 3h");
    }

    #[test]
    fn test_rounding_happens_before_day_split() {
        // 23h40m rounds to 24h and is shown as a day, not as hours
        assert_eq!(
            format_remaining(Duration::hours(23) + Duration::minutes(40)),
            "1 day"
        );
        assert_eq!(
            format_remaining(Duration::hours(47) + Duration::minutes(31)),
            "2 days"
        );
    }

    #[test]
    fn test_negative_durations_use_clock_form() {
        assert_eq!(format_remaining(Duration::seconds(-90)), "-1m30s");
    }
}
