//! Display formatting for metric values.
//!
//! These strings are what the dashboard shows verbatim:
//! - currency: en-US dollars, no decimals, comma grouping (`$12,345`)
//! - percentage: ratio × 100 with one decimal (`45.6%`)
//! - index: fixed decimals (`0.833`)

/// Format a dollar amount rounded to whole dollars, half away from zero.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}$Infinity");
    }

    let whole = format!("{:.0}", amount.abs().round());
    format!("{sign}${}", group_thousands(&whole))
}

/// Format a ratio as a percentage with one decimal place.
pub fn format_percentage(ratio: f64) -> String {
    format!("{}%", fixed(ratio * 100.0, 1))
}

/// Format an index with a fixed number of decimals (3 for indicators, 2 for gauges).
pub fn format_index(value: f64, decimals: usize) -> String {
    fixed(value, decimals)
}

fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Ties round half away from zero, not to even.
    let scale = 10f64.powi(decimals as i32);
    let scaled = (value * scale).round();
    let value = if scaled.is_finite() { scaled / scale } else { value };
    // Print negative zero as "0.0".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
