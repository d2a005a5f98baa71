//! Conversion through the reference currency

use crate::core::rates::RateTable;

/// Leniently parses an amount; anything unparsable counts as zero.
pub fn parse_amount(amount_text: &str) -> f64 {
    amount_text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Converts `amount_text` from `source` to `target`.
///
/// The table holds every rate against one reference currency, so the amount
/// goes source -> reference -> target. Returns 0 when the amount is empty or
/// either code is missing from `rates`. No rounding is applied.
pub fn convert(amount_text: &str, source: &str, target: &str, rates: &RateTable) -> f64 {
    if amount_text.is_empty() {
        return 0.0;
    }
    match (rates.get(source), rates.get(target)) {
        (Some(source_rate), Some(target_rate)) => {
            let reference_amount = parse_amount(amount_text) / source_rate;
            reference_amount * target_rate
        }
        _ => 0.0,
    }
}

/// Units of `target` per one unit of `source`, or 0 if either is missing.
pub fn conversion_rate(source: &str, target: &str, rates: &RateTable) -> f64 {
    match (rates.get(source), rates.get(target)) {
        (Some(source_rate), Some(target_rate)) => target_rate / source_rate,
        _ => 0.0,
    }
}
