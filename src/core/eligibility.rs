//! Purchase eligibility - decides whether a coupon may be applied right now.

use crate::{
    core::status::resolve_status,
    entities::{Amount, Coupon, CouponStatus, Eligibility, Ineligibility},
};
use chrono::NaiveDate;

/// Checks whether a purchase of `subtotal` on `today` may apply `coupon`.
///
/// Conditions are checked in order: status (recomputed from the window), remaining
/// uses, minimum purchase. The first failing one is reported.
#[must_use]
pub fn check_eligibility(coupon: &Coupon, subtotal: Amount, today: NaiveDate) -> Eligibility {
    match resolve_status(coupon, today) {
        CouponStatus::Upcoming => return Eligibility::Ineligible(Ineligibility::NotYetActive),
        CouponStatus::Expired => return Eligibility::Ineligible(Ineligibility::Expired),
        CouponStatus::Active => {}
    }

    if coupon.usage_count() >= coupon.usage_limit() {
        return Eligibility::Ineligible(Ineligibility::UsageExhausted);
    }

    if let Some(minimum) = coupon.min_purchase() {
        if subtotal < minimum {
            return Eligibility::Ineligible(Ineligibility::BelowMinimumPurchase { minimum });
        }
    }

    Eligibility::Eligible
}

/// True when the coupon is active, has uses left and the subtotal meets the
/// minimum purchase. Never fails.
#[must_use]
pub fn is_redeemable(coupon: &Coupon, subtotal: Amount, today: NaiveDate) -> bool {
    check_eligibility(coupon, subtotal, today).is_eligible()
}

/// Number of redemptions still available.
#[must_use]
pub const fn remaining_uses(coupon: &Coupon) -> u32 {
    coupon.usage_limit().saturating_sub(coupon.usage_count())
}
