//! Discount calculation.
//!
//! Computes the amount a coupon takes off a subtotal. Eligibility is not
//! re-checked here; callers use [`crate::core::eligibility`] first.

use crate::entities::{Amount, Coupon, DiscountKind};
use rust_decimal::{Decimal, RoundingStrategy};

/// Calculates the discount `coupon` grants on `subtotal`.
///
/// * Percentage: `subtotal * value / 100`, rounded to 2 decimal places
/// * Fixed: `value`
///
/// The result is capped at `max_discount` when present and always clamped to
/// `[0, subtotal]`.
#[must_use]
pub fn compute_discount(coupon: &Coupon, subtotal: Amount) -> Amount {
    let subtotal = subtotal.value();
    let value = coupon.discount_value().value();

    let raw = match coupon.discount_type() {
        DiscountKind::Percentage => {
            let rate = value / Decimal::ONE_HUNDRED;
            subtotal
                .checked_mul(rate)
                .unwrap_or(subtotal)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        DiscountKind::Fixed => value,
    };

    let capped = coupon
        .max_discount()
        .map_or(raw, |cap| raw.min(cap.value()));

    // Clamped into [0, subtotal], so the amount is never negative.
    Amount::new(capped.clamp(Decimal::ZERO, subtotal)).unwrap_or(Amount::ZERO)
}

/// Returns the subtotal after the discount has been taken off.
#[must_use]
pub fn discounted_total(coupon: &Coupon, subtotal: Amount) -> Amount {
    let discount = compute_discount(coupon, subtotal);
    Amount::new(subtotal.value() - discount.value()).unwrap_or(Amount::ZERO)
}
