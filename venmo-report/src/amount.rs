//! Venmo amount strings: a sign, a dollar sign, then the value.
//!
//!   + $65.00
//!   - $1,200.50

use regex::Regex;
use std::sync::LazyLock;

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<polarity>[+-])\s*\$\s*",
        r"(?P<amt>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)\s*$"
    ))
    .unwrap_or_else(|e| panic!("amount pattern: {e}"))
});

/// Parse a signed Venmo amount. Returns `None` for anything else,
/// including unsigned values.
pub fn parse_signed_amount(s: &str) -> Option<f64> {
    let caps = AMOUNT_RE.captures(s)?;
    let amount: f64 = caps["amt"].replace(',', "").parse().ok()?;
    match &caps["polarity"] {
        "-" => Some(-amount),
        _ => Some(amount),
    }
}

/// Format a value in the same shape Venmo uses, e.g. `- $12.34`.
pub fn format_signed_amount(value: f64) -> String {
    // Avoid printing "- $0.00" for values that round to zero.
    let cents = (value * 100.0).round();
    let sign = if cents < 0.0 { '-' } else { '+' };
    format!("{} ${:.2}", sign, cents.abs() / 100.0)
}
