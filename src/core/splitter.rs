use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Splits `total` into label weights of at most `max`, largest first.
///
/// All weights but the last equal `max`; the last carries the remainder.
/// A missing or non-positive `max` means one label for the whole total.
/// A zero total yields no labels.
pub fn split(total: Decimal, max: Option<Decimal>) -> Vec<Decimal> {
    if total <= Decimal::ZERO {
        return Vec::new();
    }

    let max = match max {
        Some(max) if max > Decimal::ZERO => max,
        _ => return vec![total],
    };

    let remainder = total % max;
    let full = ((total - remainder) / max)
        .trunc()
        .to_usize()
        .unwrap_or_default();

    let mut weights = vec![max; full];
    if !remainder.is_zero() {
        weights.push(remainder);
    }
    weights
}
