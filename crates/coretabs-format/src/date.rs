//! Date parsing and display styles.
//!
//! Timestamps from the portal arrive as ISO-8601 strings, with or without an
//! offset (`2024-01-15T10:30:00`, `2024-01-15T10:30:00.1234567`,
//! `2024-01-15T10:30:00+07:00`). Inputs without an offset are taken as UTC.
//!
//! Display uses the wall-clock time as written in the input unless
//! [`DateOptions::offset`] asks for a specific offset, so the same input
//! always formats the same way regardless of the host timezone.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc,
};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Display style for [`format_date`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `15/01/2024`
    #[default]
    Short,
    /// `January 15, 2024`
    Long,
    /// `2024-01-15T10:30:00.000Z`
    Iso,
    /// Pattern with `yyyy yy MM dd HH mm ss` tokens.
    Custom(String),
    /// `3 hours ago`, falling back to the short style after a week.
    Relative,
    /// `10:30 AM`
    Time,
    /// `01/15/2024, 10:30 AM`
    DateTime,
}

/// Options for [`format_date`].
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    /// Returned for empty or unparseable input (defaults: `N/A` for empty,
    /// `Invalid Date` for unparseable).
    pub fallback: Option<String>,
    /// Convert to this offset before display.
    pub offset: Option<FixedOffset>,
    /// Reference instant for [`DateStyle::Relative`] (defaults to now).
    pub now: Option<DateTime<FixedOffset>>,
}

impl DateOptions {
    /// Set the fallback string.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Display in the given offset.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Pin the reference instant used by relative formatting.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }
}

/// Parse an ISO-8601-like timestamp or a bare `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Whether `input` parses as a date.
#[must_use]
pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_some()
}

/// Format `input` in the requested style.
///
/// Empty input returns the fallback (default `N/A`); unparseable input
/// returns the fallback (default `Invalid Date`).
#[must_use]
pub fn format_date(input: &str, style: &DateStyle, options: &DateOptions) -> String {
    if input.trim().is_empty() {
        return options.fallback.clone().unwrap_or_else(|| "N/A".to_string());
    }
    let Some(parsed) = parse_date(input) else {
        tracing::trace!(message = "format.date_unparseable", input);
        return options
            .fallback
            .clone()
            .unwrap_or_else(|| "Invalid Date".to_string());
    };
    let dt = match options.offset {
        Some(offset) => parsed.with_timezone(&offset),
        None => parsed,
    };

    match style {
        DateStyle::Short => format_date_custom(&dt, "dd/MM/yyyy"),
        DateStyle::Long => dt.format("%B %-d, %Y").to_string(),
        DateStyle::Iso => dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        DateStyle::Custom(pattern) => format_date_custom(&dt, pattern),
        DateStyle::Relative => {
            let now = options.now.unwrap_or_else(|| Utc::now().fixed_offset());
            format_relative(&dt, &now)
        }
        DateStyle::Time => dt.format("%I:%M %p").to_string(),
        DateStyle::DateTime => dt.format("%m/%d/%Y, %I:%M %p").to_string(),
    }
}

/// Substitute `yyyy yy MM dd HH mm ss` tokens in `pattern`.
#[must_use]
pub fn format_date_custom(dt: &DateTime<FixedOffset>, pattern: &str) -> String {
    let year = dt.format("%Y").to_string();
    let short_year = dt.format("%y").to_string();
    pattern
        .replace("yyyy", &year)
        .replace("yy", &short_year)
        .replace("MM", &dt.format("%m").to_string())
        .replace("dd", &dt.format("%d").to_string())
        .replace("HH", &dt.format("%H").to_string())
        .replace("mm", &dt.format("%M").to_string())
        .replace("ss", &dt.format("%S").to_string())
}

/// Describe `dt` relative to `now` ("just now", "5 minutes ago", ...).
///
/// Anything a week or more in the past uses the short style.
#[must_use]
pub fn format_relative(dt: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> String {
    let seconds = now.signed_duration_since(*dt).num_seconds();
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else if days < 7 {
        format!("{days} day{} ago", plural(days))
    } else {
        format_date_custom(dt, "dd/MM/yyyy")
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
