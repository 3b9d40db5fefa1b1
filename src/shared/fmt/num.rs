//! Number formatting utilities for human-readable display.
//!
//! All helpers take `f64`; convert `Decimal` fields with `to_f64()` first.

/// Inserts thousands separators into the integer part of an already-formatted
/// number string. The fractional part is left untouched.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let len = integer_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// US-dollar amount with two decimals and separators: `-$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let sign = if value < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(&formatted))
}

/// Signed percentage: `+12.50%`, `-3.10%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}{:.*}%", plus_sign(value), decimals, value)
}

/// Fixed decimals, no separators.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Signed R-multiple with two decimals: `+2.00R`.
pub fn format_r_multiple(value: f64) -> String {
    format!("{}{:.2}R", plus_sign(value), value)
}

/// Hold time: `45m`, `2h`, `2h 5m`.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}h", hours)
    }
}

fn plus_sign(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}
