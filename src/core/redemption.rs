//! Redemption of a single, exclusively owned coupon.
//!
//! For coupons shared between concurrent callers use
//! [`crate::core::ledger::CouponLedger::redeem`], which performs the same check
//! and increment as one atomic step.

use crate::{
    entities::{Amount, Coupon},
    errors::{Error, Result},
};

/// Outcome of applying a coupon to a purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redemption {
    /// Code of the redeemed coupon
    pub code: String,
    /// Discount granted on the purchase
    pub discount: Amount,
    /// Usage count right after this redemption
    pub usage_count: u32,
}

/// Records one use of `coupon` and returns the new usage count.
///
/// # Errors
/// Returns [`Error::LimitExceeded`] when the coupon has already been used
/// `usage_limit` times. The counter is left unchanged in that case.
pub fn redeem(coupon: &mut Coupon) -> Result<u32> {
    if coupon.usage_count() >= coupon.usage_limit() {
        return Err(Error::LimitExceeded {
            code: coupon.code().to_string(),
            usage_limit: coupon.usage_limit(),
        });
    }

    coupon.record_use();
    Ok(coupon.usage_count())
}
