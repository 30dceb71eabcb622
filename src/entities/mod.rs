//! Entity module - Contains the coupon data types.
//! The coupon itself, its amounts and identifiers, the derived status and
//! eligibility outcomes, and the flat record used for export.

pub mod amount;
pub mod coupon;
pub mod record;
pub mod status;

pub use amount::Amount;
pub use coupon::{Coupon, CouponId, CouponTerms, DiscountKind, NewCoupon, ValidityWindow};
pub use record::{COLUMNS, CouponRecord};
pub use status::{CouponStatus, Eligibility, Ineligibility};
