//! The date-formatting seam used by the dynamic renderer.

use crate::date::{DateOptions, DateStyle, format_date};

/// Turns an ISO-8601 timestamp into a short display date.
///
/// Implementations must be total: unparseable input maps to a fallback
/// string rather than an error. Any `Fn(&str) -> String` closure is a
/// formatter, which keeps test doubles trivial.
pub trait DateFormatter {
    fn format_date(&self, iso: &str) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format_date(&self, iso: &str) -> String {
        self(iso)
    }
}

/// `DD/MM/YYYY` formatter with a fixed fallback for unparseable input.
#[derive(Debug, Clone)]
pub struct ShortDate {
    options: DateOptions,
}

impl Default for ShortDate {
    fn default() -> Self {
        Self {
            options: DateOptions::default().with_fallback("N/A"),
        }
    }
}

impl ShortDate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `fallback` for empty or unparseable input.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.options = self.options.with_fallback(fallback);
        self
    }

    /// Display dates in a fixed offset instead of the written wall clock.
    #[must_use]
    pub fn with_offset(mut self, offset: chrono::FixedOffset) -> Self {
        self.options = self.options.with_offset(offset);
        self
    }
}

impl DateFormatter for ShortDate {
    fn format_date(&self, iso: &str) -> String {
        format_date(iso, &DateStyle::Short, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_formats_and_falls_back() {
        let fmt = ShortDate::new();
        assert_eq!(fmt.format_date("2024-02-29T08:15:00"), "29/02/2024");
        assert_eq!(fmt.format_date("2024-02-30T08:15:00"), "N/A");
        assert_eq!(ShortDate::new().with_fallback("?").format_date(""), "?");
    }

    #[test]
    fn closures_are_formatters() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.format_date("2024-01-01t00:00:00"), "2024-01-01T00:00:00");
    }
}
