//! Time-derived coupon status and purchase eligibility outcomes.

use crate::entities::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validity classification of a coupon relative to a reference date.
///
/// Transitions are strictly `Upcoming -> Active -> Expired` as time passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    /// The validity window has not started yet
    Upcoming,
    /// The reference date falls inside the validity window
    Active,
    /// The validity window has ended
    Expired,
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// Why a purchase may not apply a coupon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    /// The coupon's window has not opened
    NotYetActive,
    /// The coupon's window has closed
    Expired,
    /// Every allowed redemption has been used
    UsageExhausted,
    /// The subtotal is below the coupon's minimum purchase
    BelowMinimumPurchase {
        /// Required subtotal
        minimum: Amount,
    },
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotYetActive => f.write_str("coupon is not active yet"),
            Self::Expired => f.write_str("coupon has expired"),
            Self::UsageExhausted => f.write_str("coupon is fully redeemed"),
            Self::BelowMinimumPurchase { minimum } => {
                write!(f, "minimum purchase of {minimum} not reached")
            }
        }
    }
}

/// Outcome of an eligibility check. Ineligibility is data, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eligibility {
    /// The purchase may apply the coupon
    Eligible,
    /// The purchase may not apply the coupon
    Ineligible(Ineligibility),
}

impl Eligibility {
    /// True for [`Eligibility::Eligible`].
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}
