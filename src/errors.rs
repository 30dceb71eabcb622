//! Unified error type for the coupon crate.
//!
//! Every fallible operation returns [`Result`]. Ineligibility of a purchase is not
//! an error on its own; it only surfaces here when a caller asks the ledger to
//! apply a coupon that cannot be applied.

use crate::entities::{CouponId, Ineligibility};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by coupon construction, redemption, configuration and export.
#[derive(Debug, Error)]
pub enum Error {
    /// The coupon has already been redeemed `usage_limit` times.
    #[error("Coupon {code} is fully redeemed (limit {usage_limit})")]
    LimitExceeded {
        /// Code of the exhausted coupon
        code: String,
        /// The usage limit that was reached
        usage_limit: u32,
    },

    /// A monetary amount was negative or otherwise unusable.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The validity window ends before it starts.
    #[error("Invalid date window: {start} is after {end}")]
    InvalidDateWindow {
        /// First valid day
        start: NaiveDate,
        /// Last valid day
        end: NaiveDate,
    },

    /// Coupon fields violate an entity invariant.
    #[error("Invalid coupon: {message}")]
    InvalidCoupon {
        /// What was wrong
        message: String,
    },

    /// A purchase asked to apply a coupon it is not eligible for.
    #[error("Coupon {code} cannot be applied: {reason}")]
    NotRedeemable {
        /// Code of the coupon
        code: String,
        /// Why the purchase is not eligible
        reason: Ineligibility,
    },

    /// No coupon with this code exists in the ledger.
    #[error("Coupon not found: {code}")]
    CouponNotFound {
        /// The code that was looked up
        code: String,
    },

    /// A coupon with this code is already in the ledger.
    #[error("Duplicate coupon code: {code}")]
    DuplicateCode {
        /// The clashing code
        code: String,
    },

    /// A coupon with this id is already in the ledger.
    #[error("Duplicate coupon id: {id}")]
    DuplicateId {
        /// The clashing id
        id: CouponId,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// I/O failure while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
