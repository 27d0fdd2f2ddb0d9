//! Elapsed-time helpers used by the routing timeline.

use crate::date::parse_date;

/// Unit for [`calculate_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationUnit {
    Millis,
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
}

impl DurationUnit {
    const fn millis(self) -> i64 {
        match self {
            Self::Millis => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }
}

/// Whole `unit`s between two timestamps (floored; negative when `end`
/// precedes `start`). `None` if either side does not parse.
#[must_use]
pub fn calculate_duration(start: &str, end: &str, unit: DurationUnit) -> Option<i64> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let millis = end.signed_duration_since(start).num_milliseconds();
    Some(millis.div_euclid(unit.millis()))
}

/// Human-readable duration: at most two units (`"1 day, 2 hours"`), or only
/// the largest unit when `short` is set.
///
/// Non-positive input returns `fallback` (default `0 minutes`); anything
/// under a minute is `Less than a minute`.
#[must_use]
pub fn format_duration(duration_ms: i64, short: bool, fallback: Option<&str>) -> String {
    if duration_ms <= 0 {
        return fallback.unwrap_or("0 minutes").to_string();
    }

    let minutes = duration_ms / 60_000;
    let hours = minutes / 60;
    let days = hours / 24;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(unit_label(days, "day"));
    }
    if hours % 24 > 0 {
        parts.push(unit_label(hours % 24, "hour"));
    }
    if minutes % 60 > 0 {
        parts.push(unit_label(minutes % 60, "minute"));
    }

    if parts.is_empty() {
        return "Less than a minute".to_string();
    }
    if short {
        return parts.swap_remove(0);
    }
    parts.truncate(2);
    parts.join(", ")
}

fn unit_label(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s")
    } else {
        format!("{n} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_between_timestamps() {
        let start = "2024-01-01T08:00:00";
        let end = "2024-01-02T10:30:00";
        assert_eq!(calculate_duration(start, end, DurationUnit::Hours), Some(26));
        assert_eq!(calculate_duration(start, end, DurationUnit::Days), Some(1));
        assert_eq!(calculate_duration(start, end, DurationUnit::Minutes), Some(1590));
        assert_eq!(calculate_duration(end, start, DurationUnit::Days), Some(-2));
        assert_eq!(calculate_duration("bad", end, DurationUnit::Hours), None);
    }

    #[test]
    fn format_duration_units() {
        let minute = 60_000;
        let hour = 60 * minute;
        let day = 24 * hour;

        assert_eq!(format_duration(0, false, None), "0 minutes");
        assert_eq!(format_duration(-5, false, Some("n/a")), "n/a");
        assert_eq!(format_duration(30_000, false, None), "Less than a minute");
        assert_eq!(format_duration(minute, false, None), "1 minute");
        assert_eq!(format_duration(day + 2 * hour + 5 * minute, false, None), "1 day, 2 hours");
        assert_eq!(format_duration(3 * day + 5 * minute, false, None), "3 days, 5 minutes");
        assert_eq!(format_duration(2 * hour + 5 * minute, true, None), "2 hours");
    }
}
