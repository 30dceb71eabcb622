//! Status resolution - derives a coupon's status from its validity window.
//!
//! Status is never read from storage. Every check that decides whether a coupon
//! may be used recomputes it here against a reference date. Both ends of the
//! window are inclusive.

use crate::entities::{Coupon, CouponStatus};
use chrono::{DateTime, NaiveDate, Utc};

/// Resolves the status of `coupon` on the calendar day `today`.
///
/// * `Upcoming` when `today < start`
/// * `Active` when `start <= today <= end`
/// * `Expired` when `today > end`
#[must_use]
pub fn resolve_status(coupon: &Coupon, today: NaiveDate) -> CouponStatus {
    let window = coupon.window();
    if today < window.start() {
        CouponStatus::Upcoming
    } else if today > window.end() {
        CouponStatus::Expired
    } else {
        CouponStatus::Active
    }
}

/// Resolves the status at a UTC instant, using its calendar date.
#[must_use]
pub fn status_at(coupon: &Coupon, moment: DateTime<Utc>) -> CouponStatus {
    resolve_status(coupon, moment.date_naive())
}

/// Resolves the status as of now.
#[must_use]
pub fn current_status(coupon: &Coupon) -> CouponStatus {
    status_at(coupon, Utc::now())
}
