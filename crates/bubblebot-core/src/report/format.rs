use chrono::{DateTime, NaiveDateTime, Utc};

const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` between groups of three digits in the integer part
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a number with thousands separators and fixed decimals
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Dollar amount with two decimals, e.g. `$1,234.50`
pub fn format_usd(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("${}", format_grouped(v, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Token prices get eight decimals
pub fn format_price(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("${}", format_grouped(v, 8)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.1}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Signed 24h change; a change of exactly zero is reported as unknown
pub fn format_change(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v != 0.0 => format!("{:+.2}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Whole number with separators, for token amounts and flow volume
pub fn format_amount(value: f64) -> String {
    if value.is_finite() {
        format_grouped(value, 0)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM UTC`
///
/// Offsets are converted to UTC; naive timestamps are printed as given.
pub fn format_last_update(value: Option<&str>) -> String {
    const OUTPUT: &str = "%Y-%m-%d %H:%M UTC";

    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return "Unknown".to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format(OUTPUT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(OUTPUT).to_string();
        }
    }

    tracing::debug!("Unparseable last update timestamp: {}", raw);
    "Unknown".to_string()
}

/// Shorten an address to `0x1234ab...abcdef`
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0, 2), "0.00");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(1000.0, 0), "1,000");
        assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-9876543.0, 1), "-9,876,543.0");
        assert_eq!(format_grouped(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_usd_and_price() {
        assert_eq!(format_usd(Some(1234.5)), "$1,234.50");
        assert_eq!(format_usd(None), "N/A");
        assert_eq!(format_usd(Some(f64::NAN)), "N/A");
        assert_eq!(format_price(Some(0.00001234)), "$0.00001234");
        assert_eq!(format_price(Some(2500.0)), "$2,500.00000000");
    }

    #[test]
    fn test_format_percent_and_change() {
        assert_eq!(format_percent(Some(12.345)), "12.3%");
        assert_eq!(format_percent(None), "N/A");
        assert_eq!(format_change(Some(3.14159)), "+3.14%");
        assert_eq!(format_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_change(Some(0.0)), "N/A");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_format_counts_and_amounts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_amount(98765.4), "98,765");
        assert_eq!(format_amount(f64::INFINITY), "N/A");
    }

    #[test]
    fn test_format_last_update() {
        assert_eq!(
            format_last_update(Some("2024-03-05T14:07:33.123Z")),
            "2024-03-05 14:07 UTC"
        );
        assert_eq!(
            format_last_update(Some("2024-03-05T14:07:33+02:00")),
            "2024-03-05 12:07 UTC"
        );
        assert_eq!(
            format_last_update(Some("2024-03-05T14:07:33.000123")),
            "2024-03-05 14:07 UTC"
        );
        assert_eq!(format_last_update(Some("yesterday")), "Unknown");
        assert_eq!(format_last_update(None), "Unknown");
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten_address("0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce"),
            "0x95ad61...64c4ce"
        );
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }
}
