//! Non-negative monetary amount.
//!
//! Subtotals, discount values, minimum purchases and discount caps are all
//! `Amount`s. A negative value cannot be constructed, so the pure discount and
//! eligibility functions never have to reject their inputs.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative decimal amount in the shop's currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal, rejecting negative values with [`Error::InvalidAmount`].
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount: value });
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// True when the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_negative_amount_rejected() {
        let result = Amount::new(Decimal::new(-1, 2));
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_zero_and_positive_accepted() {
        assert!(Amount::new(Decimal::ZERO).unwrap().is_zero());
        let amount = Amount::new(Decimal::new(1250, 2)).unwrap();
        assert_eq!(amount.value(), Decimal::new(1250, 2));
        assert_eq!(amount.to_string(), "12.50");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            amount: Amount,
        }

        let ok: Wrapper = toml::from_str("amount = 500").unwrap();
        assert_eq!(ok.amount, Amount::from(500_u32));

        let err = toml::from_str::<Wrapper>("amount = -5");
        assert!(err.is_err());
    }
}
