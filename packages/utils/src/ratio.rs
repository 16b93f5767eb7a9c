use cosmwasm_std::{Decimal, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;

#[derive(Error, Debug, PartialEq)]
pub enum RatioError {
    #[error("Ratio {0} is above 100%")]
    AboveOne(Decimal),
}

/// Fraction in the `[0, 1]` range stored with 18 decimal places, where `1.0` means 100%.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, JsonSchema,
)]
#[serde(transparent)]
pub struct Ratio(Decimal);

impl Ratio {
    pub const fn zero() -> Self {
        Self(Decimal::zero())
    }

    pub const fn one() -> Self {
        Self(Decimal::one())
    }

    /// Wraps `value`, rejecting anything above 100%.
    pub fn new(value: Decimal) -> Result<Self, RatioError> {
        if value > Decimal::one() {
            return Err(RatioError::AboveOne(value));
        }
        Ok(Self(value))
    }

    /// Builds a ratio from its 18-decimal fixed point representation.
    pub fn from_atomics(atomics: impl Into<Uint128>) -> Result<Self, RatioError> {
        Self::new(Decimal::new(atomics.into()))
    }

    pub fn percent(percent: u64) -> Result<Self, RatioError> {
        Self::new(Decimal::percent(percent))
    }

    pub fn permille(permille: u64) -> Result<Self, RatioError> {
        Self::new(Decimal::permille(permille))
    }

    pub fn atomics(&self) -> Uint128 {
        self.0.atomics()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn decimal(&self) -> Decimal {
        self.0
    }

    /// Adds `other`, saturating at 100%.
    pub fn saturating_add(self, other: Self) -> Self {
        let sum = self.atomics().saturating_add(other.atomics());
        Self(Decimal::new(sum.min(Decimal::one().atomics())))
    }

    /// Subtracts `other`, saturating at 0%.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(Decimal::new(self.atomics().saturating_sub(other.atomics())))
    }

    /// Distance between two ratios.
    pub fn abs_diff(self, other: Self) -> Self {
        if self > other {
            self.saturating_sub(other)
        } else {
            other.saturating_sub(self)
        }
    }

    /// Restricts the ratio to `[min, max]`. `min` must not exceed `max`.
    pub fn clamp_to(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl TryFrom<Decimal> for Ratio {
    type Error = RatioError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for Decimal {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
