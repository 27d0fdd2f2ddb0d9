#![forbid(unsafe_code)]

//! Value formatting for CoreTabs views.
//!
//! - [`date`]: parsing of the portal's ISO-8601 timestamps and the display
//!   styles used across the sidebar (short, long, custom patterns, relative).
//! - [`duration`]: elapsed-time arithmetic and human-readable durations.
//! - [`number`]: file sizes, currency amounts, status labels and plain
//!   number text.
//! - [`formatter`]: the [`DateFormatter`] seam consumed by the dynamic
//!   renderer, with the default [`ShortDate`] implementation.
//!
//! Every function here is total: unparseable input yields a documented
//! fallback string (or `None`), never an error.

pub mod date;
pub mod duration;
pub mod formatter;
pub mod number;

pub use date::{DateOptions, DateStyle, format_date, format_date_custom, is_valid_date, parse_date};
pub use duration::{DurationUnit, calculate_duration, format_duration};
pub use formatter::{DateFormatter, ShortDate};
pub use number::{format_currency, format_file_size, format_number, format_status};
