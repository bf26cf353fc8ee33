//! Human-scaled rendering of revenue and count metrics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Scale suffixes, one per division by 1000. The last tier is unbounded.
const UNITS: [&str; 4] = ["", "thousand", "million", "billion"];

/// Render `value` with two decimals and a scale suffix.
///
/// Values under 1000 keep an empty suffix (`999.4` → `"999.40 "`); each tier
/// above divides by 1000 once (`2500` → `"2.50 thousand"`). A non-empty
/// `prefix` is prepended with a separating space (`"R$ 2.50 thousand"`).
#[must_use]
pub fn format_magnitude(value: f64, prefix: &str) -> String {
    let mut scaled = value;
    let mut unit = UNITS[0];
    for (tier, candidate) in UNITS.iter().enumerate() {
        unit = candidate;
        if scaled.abs() < 1000.0 || tier == UNITS.len() - 1 {
            break;
        }
        scaled /= 1000.0;
    }

    if prefix.is_empty() {
        format!("{scaled:.2} {unit}")
    } else {
        format!("{prefix} {scaled:.2} {unit}")
    }
}

/// Revenue metric in reais, e.g. `"R$ 350.00 "`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    format_magnitude(value.to_f64().unwrap_or_default(), "R$")
}

/// Transaction-count metric, e.g. `"3.00 "`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: usize) -> String {
    format_magnitude(count as f64, "")
}
