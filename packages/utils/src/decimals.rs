//! Conversions between amounts of tokens with different decimal precisions.
//!
//! Prices are expressed as [`Decimal256`] "whole index units per whole token". All helpers
//! multiply before dividing so that the only precision lost is the truncation to the
//! target unit's resolution, and every multiplication is checked.

use cosmwasm_std::{Decimal256, DivideByZeroError, OverflowError, Uint256};
use thiserror::Error;

/// Largest precision accepted for tokens and index units.
pub const MAX_DECIMALS: u8 = 36;

#[derive(Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("Cannot convert using a zero price")]
    ZeroPrice {},

    #[error("Precision of {0} decimals is not supported")]
    UnsupportedDecimals(u8),
}

/// `10^exponent` as a [`Uint256`].
pub fn pow10(exponent: u8) -> Result<Uint256, ConversionError> {
    if exponent > MAX_DECIMALS {
        return Err(ConversionError::UnsupportedDecimals(exponent));
    }
    Ok(Uint256::from(10u8).checked_pow(exponent as u32)?)
}

/// Rescales a raw amount from `from_decimals` to `to_decimals` without a price.
pub fn rescale(
    amount: Uint256,
    from_decimals: u8,
    to_decimals: u8,
) -> Result<Uint256, ConversionError> {
    if to_decimals >= from_decimals {
        Ok(amount.checked_mul(pow10(to_decimals - from_decimals)?)?)
    } else {
        Ok(amount.checked_div(pow10(from_decimals - to_decimals)?)?)
    }
}

/// Values `amount` raw token units in raw index units.
///
/// `index = amount * price * 10^index_decimals / 10^token_decimals`
pub fn to_index_units(
    amount: Uint256,
    price: Decimal256,
    token_decimals: u8,
    index_decimals: u8,
) -> Result<Uint256, ConversionError> {
    if price.is_zero() {
        return Err(ConversionError::ZeroPrice {});
    }
    let mut numerator = amount.checked_mul(price.atomics())?;
    let mut denominator = fractional();
    if index_decimals >= token_decimals {
        numerator = numerator.checked_mul(pow10(index_decimals - token_decimals)?)?;
    } else {
        denominator = denominator.checked_mul(pow10(token_decimals - index_decimals)?)?;
    }
    Ok(numerator.checked_div(denominator)?)
}

/// Amount of raw token units worth `index_amount` raw index units.
///
/// `tokens = index_amount * 10^token_decimals / (price * 10^index_decimals)`
pub fn from_index_units(
    index_amount: Uint256,
    price: Decimal256,
    token_decimals: u8,
    index_decimals: u8,
) -> Result<Uint256, ConversionError> {
    if price.is_zero() {
        return Err(ConversionError::ZeroPrice {});
    }
    let mut numerator = index_amount.checked_mul(fractional())?;
    let mut denominator = price.atomics();
    if token_decimals >= index_decimals {
        numerator = numerator.checked_mul(pow10(token_decimals - index_decimals)?)?;
    } else {
        denominator = denominator.checked_mul(pow10(index_decimals - token_decimals)?)?;
    }
    Ok(numerator.checked_div(denominator)?)
}

/// Price implied by a raw amount ratio, normalised to whole units.
///
/// `price = index_amount / 10^index_decimals / (token_amount / 10^token_decimals)`
pub fn price_from_amounts(
    token_amount: Uint256,
    token_decimals: u8,
    index_amount: Uint256,
    index_decimals: u8,
) -> Result<Decimal256, ConversionError> {
    if token_amount.is_zero() {
        return Err(ConversionError::ZeroPrice {});
    }
    let mut numerator = index_amount.checked_mul(fractional())?;
    let mut denominator = token_amount;
    if token_decimals >= index_decimals {
        numerator = numerator.checked_mul(pow10(token_decimals - index_decimals)?)?;
    } else {
        denominator = denominator.checked_mul(pow10(index_decimals - token_decimals)?)?;
    }
    Ok(Decimal256::new(numerator.checked_div(denominator)?))
}

/// Relative spread between two prices: `|a - b| / min(a, b)`. Zero when either is zero.
pub fn relative_spread(a: Decimal256, b: Decimal256) -> Decimal256 {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    if low.is_zero() {
        return Decimal256::zero();
    }
    Decimal256::checked_from_ratio(high.atomics() - low.atomics(), low.atomics())
        .unwrap_or(Decimal256::MAX)
}

fn fractional() -> Uint256 {
    Decimal256::one().atomics()
}
