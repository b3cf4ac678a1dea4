//! Conversion between base units and display units.

use crate::errors::CoreError;
use crate::types::Balance;

/// Number of fractional digits in a display-unit amount.
pub const DISPLAY_DECIMALS: usize = 12;

/// Base units in one display unit.
pub const BASE_UNITS_PER_DISPLAY_UNIT: Balance = 1_000_000_000_000;

/// Formats a base-unit amount in display units, trimming trailing zeros.
pub fn to_display(base: Balance) -> String {
    let whole = base / BASE_UNITS_PER_DISPLAY_UNIT;
    let frac = base % BASE_UNITS_PER_DISPLAY_UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = DISPLAY_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parses a display-unit amount into base units.
///
/// Digits beyond [`DISPLAY_DECIMALS`] are rounded half-up.
pub fn parse_display(amount: &str) -> Result<Balance, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidAmount(format!("{:?}: {}", amount, reason));

    let amount_str = amount.trim();
    if amount_str.starts_with('-') {
        return Err(invalid("amount must not be negative"));
    }
    let amount_str = amount_str.strip_prefix('+').unwrap_or(amount_str);

    let (whole, frac) = match amount_str.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount_str, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("expected a number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected decimal digits"));
    }

    let whole: Balance = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("amount is too large"))?
    };

    let (kept, dropped) = frac.split_at(frac.len().min(DISPLAY_DECIMALS));
    let mut frac_units: Balance = if kept.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", kept, width = DISPLAY_DECIMALS);
        padded.parse().map_err(|_| invalid("expected decimal digits"))?
    };
    if dropped.as_bytes().first().map_or(false, |d| *d >= b'5') {
        frac_units += 1;
    }

    whole
        .checked_mul(BASE_UNITS_PER_DISPLAY_UNIT)
        .and_then(|base| base.checked_add(frac_units))
        .ok_or_else(|| invalid("amount is too large"))
}
