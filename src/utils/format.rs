use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Format a number with thousands separators and a fixed number of decimals.
///
/// Non-finite input formats as zero.
pub fn format_number(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let grouped = int_part
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// `$1,234.50`, negative values as `-$1,234.50`.
pub fn format_usd(value: f64) -> String {
    let formatted = format_number(value, 2);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", formatted),
    }
}

/// Dust amounts keep six decimals so they do not render as zero.
pub fn format_token_amount(amount: f64, symbol: &str) -> String {
    let decimals = if amount != 0.0 && amount.abs() < 0.01 { 6 } else { 2 };
    let number = format_number(amount, decimals);
    if symbol.is_empty() {
        number
    } else {
        format!("{} {}", number, symbol)
    }
}

/// Signed percentage, `+2.5%` or `-3.2%`, at most two decimals.
pub fn format_percent_change(change: f64) -> String {
    let change = if change.is_finite() { change } else { 0.0 };
    let magnitude = trim_decimals(&format!("{:.2}", change.abs()));
    if magnitude == "0" || change >= 0.0 {
        format!("+{}%", magnitude)
    } else {
        format!("-{}%", magnitude)
    }
}

fn trim_decimals(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `Mar 5, 2024`. Unparseable input is returned unchanged.
pub fn format_date(s: &str) -> String {
    match parse_date_time(s) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => s.to_string(),
    }
}

/// Shorten an address to `0x1234...abcd`.
pub fn format_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
