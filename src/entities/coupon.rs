//! Coupon entity - a discount offer redeemable by code.
//!
//! A coupon carries its redemption code, discount terms, validity window and usage
//! counters. Fields are private so the invariants (`start <= end`,
//! `usage_count <= usage_limit`, percentage at most 100) hold for every value of
//! the type. Status is not stored: it is always derived from the window, see
//! [`crate::core::status`].

use crate::{
    entities::Amount,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque coupon identifier, unique within a coupon collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouponId(pub u64);

impl fmt::Display for CouponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for CouponId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// How a coupon's discount value is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `discount_value` is a percentage of the subtotal (0 to 100)
    Percentage,
    /// `discount_value` is a fixed currency amount
    Fixed,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage => f.write_str("percentage"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

/// Inclusive range of calendar days during which a coupon is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValidityWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ValidityWindow {
    /// Builds a window, rejecting `end < start` with [`Error::InvalidDateWindow`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// First active day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last active day.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// The administratively editable part of a coupon.
///
/// Everything except the id, the code and the usage counter. Edits go through
/// [`Coupon::replace_terms`] or the ledger, which re-validate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CouponTerms {
    /// Free text shown to admins and customers
    pub description: String,
    /// Percentage or fixed discount
    pub discount_type: DiscountKind,
    /// Percentage (0 to 100) or fixed currency amount
    pub discount_value: Amount,
    /// Days on which the coupon is active
    pub window: ValidityWindow,
    /// Maximum number of redemptions
    pub usage_limit: u32,
    /// Eligibility floor on the order subtotal
    pub min_purchase: Option<Amount>,
    /// Cap on the computed discount
    pub max_discount: Option<Amount>,
}

impl CouponTerms {
    fn validate(&self) -> Result<()> {
        if self.discount_type == DiscountKind::Percentage
            && self.discount_value.value() > Decimal::ONE_HUNDRED
        {
            return Err(Error::InvalidCoupon {
                message: format!(
                    "percentage discount must be between 0 and 100, got {}",
                    self.discount_value
                ),
            });
        }
        Ok(())
    }
}

/// Input for creating a coupon. Creation always starts with zero uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCoupon {
    /// Case-sensitive redemption code
    pub code: String,
    /// Discount terms and limits
    pub terms: CouponTerms,
}

/// A discount offer identified by its redemption code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coupon {
    id: CouponId,
    code: String,
    terms: CouponTerms,
    usage_count: u32,
}

impl Coupon {
    /// Creates a coupon with `usage_count = 0`, validating code and terms.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCoupon`] if the code is empty or padded with
    /// whitespace, or a percentage discount exceeds 100.
    pub fn create(id: CouponId, new: NewCoupon) -> Result<Self> {
        Self::restore(id, new.code, new.terms, 0)
    }

    /// Rebuilds a coupon that already has redemptions, e.g. from an exported record.
    ///
    /// # Errors
    /// Same as [`Coupon::create`], plus [`Error::InvalidCoupon`] when
    /// `usage_count` exceeds the usage limit.
    pub fn restore(
        id: CouponId,
        code: String,
        terms: CouponTerms,
        usage_count: u32,
    ) -> Result<Self> {
        if code.trim().is_empty() {
            return Err(Error::InvalidCoupon {
                message: "Coupon code cannot be empty".to_string(),
            });
        }
        if code.trim() != code {
            return Err(Error::InvalidCoupon {
                message: format!("Coupon code {code:?} has leading or trailing whitespace"),
            });
        }
        terms.validate()?;
        check_usage(usage_count, terms.usage_limit)?;

        Ok(Self {
            id,
            code,
            terms,
            usage_count,
        })
    }

    /// Applies an administrative edit. The usage counter is left untouched.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCoupon`] if the new terms are invalid or the new
    /// usage limit is below the number of redemptions already made.
    pub fn replace_terms(&mut self, terms: CouponTerms) -> Result<()> {
        terms.validate()?;
        check_usage(self.usage_count, terms.usage_limit)?;
        self.terms = terms;
        Ok(())
    }

    /// Coupon identifier.
    #[must_use]
    pub const fn id(&self) -> CouponId {
        self.id
    }

    /// Redemption code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Editable terms.
    #[must_use]
    pub const fn terms(&self) -> &CouponTerms {
        &self.terms
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.terms.description
    }

    /// Percentage or fixed.
    #[must_use]
    pub const fn discount_type(&self) -> DiscountKind {
        self.terms.discount_type
    }

    /// Raw discount value.
    #[must_use]
    pub const fn discount_value(&self) -> Amount {
        self.terms.discount_value
    }

    /// Validity window.
    #[must_use]
    pub const fn window(&self) -> ValidityWindow {
        self.terms.window
    }

    /// Maximum number of redemptions.
    #[must_use]
    pub const fn usage_limit(&self) -> u32 {
        self.terms.usage_limit
    }

    /// Redemptions made so far.
    #[must_use]
    pub const fn usage_count(&self) -> u32 {
        self.usage_count
    }

    /// Minimum subtotal, if any.
    #[must_use]
    pub const fn min_purchase(&self) -> Option<Amount> {
        self.terms.min_purchase
    }

    /// Discount cap, if any.
    #[must_use]
    pub const fn max_discount(&self) -> Option<Amount> {
        self.terms.max_discount
    }

    /// Increments the usage counter. Callers check capacity first.
    pub(crate) fn record_use(&mut self) {
        self.usage_count += 1;
    }

    /// Overwrites the usage counter with the ledger's authoritative value.
    pub(crate) fn with_usage_count(mut self, usage_count: u32) -> Self {
        self.usage_count = usage_count;
        self
    }
}

fn check_usage(usage_count: u32, usage_limit: u32) -> Result<()> {
    if usage_count > usage_limit {
        return Err(Error::InvalidCoupon {
            message: format!("usage count {usage_count} exceeds usage limit {usage_limit}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_create_starts_with_zero_uses() {
        let coupon = create_test_coupon("WELCOME20");
        assert_eq!(coupon.usage_count(), 0);
        assert_eq!(coupon.code(), "WELCOME20");
        assert_eq!(coupon.discount_type(), DiscountKind::Percentage);
    }

    #[test]
    fn test_window_rejects_end_before_start() {
        let result = ValidityWindow::new(date(2026, 3, 10), date(2026, 3, 9));
        assert!(matches!(result, Err(Error::InvalidDateWindow { .. })));

        let single_day = ValidityWindow::new(date(2026, 3, 10), date(2026, 3, 10)).unwrap();
        assert_eq!(single_day.start(), single_day.end());
    }

    #[test]
    fn test_create_validation() {
        let blank = NewCoupon {
            code: "   ".to_string(),
            terms: percentage_terms(20, 100),
        };
        assert!(matches!(
            Coupon::create(CouponId(1), blank),
            Err(Error::InvalidCoupon { .. })
        ));

        let padded = NewCoupon {
            code: " PAD ".to_string(),
            terms: percentage_terms(10, 5),
        };
        assert!(matches!(
            Coupon::create(CouponId(1), padded),
            Err(Error::InvalidCoupon { .. })
        ));
        assert!(matches!(
            Coupon::restore(CouponId(1), "PAD\t".to_string(), percentage_terms(10, 5), 0),
            Err(Error::InvalidCoupon { .. })
        ));

        let over_hundred = NewCoupon {
            code: "TOOMUCH".to_string(),
            terms: percentage_terms(150, 100),
        };
        assert!(matches!(
            Coupon::create(CouponId(2), over_hundred),
            Err(Error::InvalidCoupon { .. })
        ));

        // Fixed discounts have no upper bound on their value
        let mut terms = fixed_terms(150, 100);
        terms.discount_value = amount(10_000);
        let large_fixed = NewCoupon {
            code: "BIGFIXED".to_string(),
            terms,
        };
        assert!(Coupon::create(CouponId(3), large_fixed).is_ok());
    }

    #[test]
    fn test_restore_rejects_usage_over_limit() {
        let result = Coupon::restore(
            CouponId(1),
            "OVER".to_string(),
            percentage_terms(10, 5),
            6,
        );
        assert!(matches!(result, Err(Error::InvalidCoupon { .. })));

        let at_limit = Coupon::restore(CouponId(1), "FULL".to_string(), percentage_terms(10, 5), 5);
        assert_eq!(at_limit.unwrap().usage_count(), 5);
    }

    #[test]
    fn test_replace_terms_keeps_usage_count() {
        let mut coupon =
            Coupon::restore(CouponId(7), "EDIT".to_string(), percentage_terms(10, 10), 4).unwrap();

        let mut terms = fixed_terms(75, 20);
        terms.description = "Flat 75 off".to_string();
        coupon.replace_terms(terms).unwrap();

        assert_eq!(coupon.usage_count(), 4);
        assert_eq!(coupon.discount_type(), DiscountKind::Fixed);
        assert_eq!(coupon.description(), "Flat 75 off");

        // Cannot shrink the limit below what has already been used
        let result = coupon.replace_terms(fixed_terms(75, 3));
        assert!(matches!(result, Err(Error::InvalidCoupon { .. })));
        assert_eq!(coupon.usage_limit(), 20);
    }
}
