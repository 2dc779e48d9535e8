//! Conversions between human-entered token amounts and native integer units.
//!
//! All arithmetic goes through [`Decimal`]; nothing here touches binary
//! floating point. Native amounts are SPL token amounts and therefore `u64`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Largest mint exponent a display amount can be expressed with.
pub const MAX_DECIMALS: u8 = 28;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    Parse(String),

    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("amount does not fit a token balance: {value} * 10^{decimals}")]
    Overflow { value: String, decimals: u8 },

    #[error("unsupported mint decimals: {0}")]
    UnsupportedDecimals(u8),
}

/// Parse a display amount as an exact decimal.
///
/// Surrounding whitespace is ignored. Only plain decimal notation is accepted:
/// digits with at most one `.`, optionally preceded by `-`. Exponents, digit
/// separators and a leading `+` are `Parse` errors. A well-formed number with
/// more digits than a [`Decimal`] holds is `Overflow`.
pub fn parse_display(display: &str) -> Result<Decimal, AmountError> {
    let trimmed = display.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if !is_plain_decimal(unsigned) {
        return Err(AmountError::Parse(trimmed.to_string()));
    }

    let normalized = if unsigned.starts_with('.') {
        format!("0{unsigned}")
    } else {
        unsigned.trim_end_matches('.').to_string()
    };
    let value = Decimal::from_str(&normalized).map_err(|_| AmountError::Overflow {
        value: trimmed.to_string(),
        decimals: 0,
    })?;
    if negative && !value.is_zero() {
        return Err(AmountError::Negative(trimmed.to_string()));
    }
    Ok(value)
}

/// Digits with at most one `.` and at least one digit.
fn is_plain_decimal(s: &str) -> bool {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Convert a display amount to native units: `round(display * 10^decimals)`.
///
/// Rounds half away from zero. An empty (or blank) input means "everything"
/// and returns `max`.
///
/// # Errors
///
/// `Parse` for non-numeric input, `Negative` for amounts below zero and
/// `Overflow` when the scaled value does not fit in a `u64`.
pub fn to_native(display: &str, decimals: u8, max: u64) -> Result<u64, AmountError> {
    if display.trim().is_empty() {
        return Ok(max);
    }
    let value = parse_display(display).map_err(|e| match e {
        AmountError::Overflow { value, .. } => AmountError::Overflow { value, decimals },
        other => other,
    })?;
    scale_to_native(value, decimals)
}

/// Scale an already-parsed decimal into native units.
pub fn scale_to_native(value: Decimal, decimals: u8) -> Result<u64, AmountError> {
    let overflow = || AmountError::Overflow {
        value: value.to_string(),
        decimals,
    };

    let rounded =
        value.round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
    let mantissa = rounded.mantissa().unsigned_abs();
    if mantissa == 0 {
        return Ok(0);
    }

    // rounded.scale() <= decimals after rounding
    let shift = decimals as u32 - rounded.scale();
    let native = 10u128
        .checked_pow(shift)
        .and_then(|factor| mantissa.checked_mul(factor))
        .ok_or_else(overflow)?;
    u64::try_from(native).map_err(|_| overflow())
}

/// Native units as an exact decimal: `native / 10^decimals`.
pub fn to_decimal(native: u64, decimals: u8) -> Result<Decimal, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    Ok(Decimal::from_i128_with_scale(native as i128, decimals as u32).normalize())
}

/// Native units formatted for display, trailing zeros trimmed.
pub fn to_display(native: u64, decimals: u8) -> Result<String, AmountError> {
    Ok(to_decimal(native, decimals)?.to_string())
}

/// True iff `0 < native <= max`.
pub fn validate(native: u64, max: u64) -> bool {
    native > 0 && native <= max
}
