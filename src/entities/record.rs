//! Flat coupon record - the plain field/value shape used for export.
//!
//! Field order is the column order of every export: id, code, description,
//! discountType, discountValue, startDate, endDate, status, usageLimit,
//! usageCount, minPurchase, maxDiscount. There are no nested structures.
//! Amounts are written and read as decimal strings so no float conversion
//! touches them.

use crate::{
    core::status::resolve_status,
    entities::{Amount, Coupon, CouponId, CouponStatus, CouponTerms, DiscountKind, ValidityWindow},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Header names in export order.
pub const COLUMNS: [&str; 12] = [
    "id",
    "code",
    "description",
    "discountType",
    "discountValue",
    "startDate",
    "endDate",
    "status",
    "usageLimit",
    "usageCount",
    "minPurchase",
    "maxDiscount",
];

/// One coupon as a flat record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    /// Coupon identifier
    pub id: CouponId,
    /// Redemption code
    pub code: String,
    /// Free-text description
    pub description: String,
    /// `"percentage"` or `"fixed"`
    pub discount_type: DiscountKind,
    /// Raw discount value
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    /// First active day
    pub start_date: NaiveDate,
    /// Last active day
    pub end_date: NaiveDate,
    /// Status computed when the record was produced
    pub status: CouponStatus,
    /// Maximum number of redemptions
    pub usage_limit: u32,
    /// Redemptions made so far
    pub usage_count: u32,
    /// Minimum subtotal, empty when absent
    #[serde(with = "rust_decimal::serde::str_option")]
    pub min_purchase: Option<Decimal>,
    /// Discount cap, empty when absent
    #[serde(with = "rust_decimal::serde::str_option")]
    pub max_discount: Option<Decimal>,
}

impl Coupon {
    /// Flattens the coupon, stamping the status as of `today`.
    #[must_use]
    pub fn to_record(&self, today: NaiveDate) -> CouponRecord {
        CouponRecord {
            id: self.id(),
            code: self.code().to_string(),
            description: self.description().to_string(),
            discount_type: self.discount_type(),
            discount_value: self.discount_value().value(),
            start_date: self.window().start(),
            end_date: self.window().end(),
            status: resolve_status(self, today),
            usage_limit: self.usage_limit(),
            usage_count: self.usage_count(),
            min_purchase: self.min_purchase().map(Amount::value),
            max_discount: self.max_discount().map(Amount::value),
        }
    }
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = Error;

    /// Rebuilds and re-validates a coupon. The record's `status` column is not
    /// trusted; status is always recomputed from the window.
    fn try_from(record: CouponRecord) -> Result<Self> {
        let terms = CouponTerms {
            description: record.description,
            discount_type: record.discount_type,
            discount_value: Amount::new(record.discount_value)?,
            window: ValidityWindow::new(record.start_date, record.end_date)?,
            usage_limit: record.usage_limit,
            min_purchase: record.min_purchase.map(Amount::new).transpose()?,
            max_discount: record.max_discount.map(Amount::new).transpose()?,
        };
        Self::restore(record.id, record.code, terms, record.usage_count)
    }
}
