//! Number, size, currency and status formatting.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Plain decimal text for a number: integral values print without a
/// fractional part (`1500000`, not `1500000.0`), other values use the
/// shortest representation that round-trips. Magnitudes of `1e21` and up,
/// or below `1e-6`, use exponent form (`1.5e+300`, `1e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        return exponent_form(value);
    }
    if value.fract() == 0.0 && magnitude < 1e15 {
        // Integral and well inside i64 range.
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// `1.5e300` becomes `1.5e+300`; negative exponents are kept as is.
fn exponent_form(value: f64) -> String {
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Human-readable file size in 1024 steps (`"1.5 KB"`), rounded to two
/// decimals. `None` for zero bytes.
#[must_use]
pub fn format_file_size(bytes: u64) -> Option<String> {
    if bytes == 0 {
        return None;
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    Some(format!("{} {}", format_number(rounded), SIZE_UNITS[unit]))
}

/// Currency amount with thousands separators (`"$1,234.56"`,
/// `"IDR 1,500,000.00"`). `None` for a zero amount.
#[must_use]
pub fn format_currency(amount: f64, currency: &str) -> Option<String> {
    if amount == 0.0 || !amount.is_finite() {
        return None;
    }
    let currency = if currency.trim().is_empty() {
        "USD".to_string()
    } else {
        currency.trim().to_ascii_uppercase()
    };
    let (prefix, decimals) = match currency.as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        other => (format!("{other} "), 2),
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    Some(format!(
        "{sign}{prefix}{}",
        group_thousands(amount.abs(), decimals)
    ))
}

/// Capitalize the first character and lower-case the rest
/// (`"IN PROGRESS"` → `"In progress"`).
#[must_use]
pub fn format_status(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_text() {
        assert_eq!(format_number(1_500_000.0), "1500000");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn extreme_magnitudes_use_exponents() {
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2e21), "-2e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), None);
        assert_eq!(format_file_size(512).as_deref(), Some("512 Bytes"));
        assert_eq!(format_file_size(1536).as_deref(), Some("1.5 KB"));
        assert_eq!(format_file_size(1_048_576).as_deref(), Some("1 MB"));
        assert_eq!(format_file_size(1_234_567).as_deref(), Some("1.18 MB"));
        assert_eq!(
            format_file_size(5 * 1024 * 1024 * 1024 * 1024).as_deref(),
            Some("5120 GB")
        );
    }

    #[test]
    fn currency() {
        assert_eq!(format_currency(0.0, "USD"), None);
        assert_eq!(format_currency(1234.5, "USD").as_deref(), Some("$1,234.50"));
        assert_eq!(format_currency(1234.5, "").as_deref(), Some("$1,234.50"));
        assert_eq!(
            format_currency(1_500_000.0, "idr").as_deref(),
            Some("IDR 1,500,000.00")
        );
        assert_eq!(format_currency(-42.0, "EUR").as_deref(), Some("-€42.00"));
        assert_eq!(format_currency(1234.0, "JPY").as_deref(), Some("¥1,234"));
    }

    #[test]
    fn status_labels() {
        assert_eq!(format_status("IN PROGRESS"), "In progress");
        assert_eq!(format_status("approved"), "Approved");
        assert_eq!(format_status(""), "");
    }
}
