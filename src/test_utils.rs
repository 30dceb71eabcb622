//! Shared test utilities for the coupon crate.
//!
//! This module provides common helpers for building coupons and a seeded ledger
//! with sensible defaults.
#![allow(clippy::unwrap_used)]

use crate::{
    core::ledger::CouponLedger,
    entities::{Amount, Coupon, CouponId, CouponTerms, DiscountKind, NewCoupon, ValidityWindow},
    errors::Result,
};
use chrono::NaiveDate;

/// Builds a calendar date, panicking on an impossible one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Whole-unit amount.
pub fn amount(whole: u32) -> Amount {
    Amount::from(whole)
}

/// Reference date that `setup_ledger` coupons are arranged around.
pub fn test_today() -> NaiveDate {
    date(2026, 6, 15)
}

/// Percentage terms with no minimum purchase and no cap.
///
/// # Defaults
/// * `description`: `"Test coupon"`
/// * window: March 2026
pub fn percentage_terms(percent: u32, usage_limit: u32) -> CouponTerms {
    CouponTerms {
        description: "Test coupon".to_string(),
        discount_type: DiscountKind::Percentage,
        discount_value: amount(percent),
        window: ValidityWindow::new(date(2026, 3, 1), date(2026, 3, 31)).unwrap(),
        usage_limit,
        min_purchase: None,
        max_discount: None,
    }
}

/// Fixed-amount terms with no minimum purchase and no cap.
pub fn fixed_terms(value: u32, usage_limit: u32) -> CouponTerms {
    CouponTerms {
        discount_type: DiscountKind::Fixed,
        discount_value: amount(value),
        ..percentage_terms(0, usage_limit)
    }
}

/// Creates a 20% coupon with id 1, limit 100, active through March 2026.
pub fn create_test_coupon(code: &str) -> Coupon {
    create_custom_coupon_with_id(1, code)
}

/// Same as [`create_test_coupon`] with a chosen id.
pub fn create_custom_coupon_with_id(id: u64, code: &str) -> Coupon {
    Coupon::create(
        CouponId(id),
        NewCoupon {
            code: code.to_string(),
            terms: percentage_terms(20, 100),
        },
    )
    .unwrap()
}

/// Creates a coupon with id 1 from `terms`, overriding the window.
pub fn create_custom_coupon(
    code: &str,
    mut terms: CouponTerms,
    start: NaiveDate,
    end: NaiveDate,
) -> Coupon {
    terms.window = ValidityWindow::new(start, end).unwrap();
    Coupon::create(
        CouponId(1),
        NewCoupon {
            code: code.to_string(),
            terms,
        },
    )
    .unwrap()
}

/// Sets up a ledger with one coupon per status as of [`test_today`].
///
/// * id 1 `MATINEE`: active in June 2026, 20% off, min 500, max 200, limit 100
/// * id 2 `EARLYBIRD`: upcoming in July 2026, fixed 150, limit 50
/// * id 3 `SPRING`: expired after March 2026, 10% off, limit 10
pub fn setup_ledger() -> Result<CouponLedger> {
    let mut matinee = percentage_terms(20, 100);
    matinee.window = ValidityWindow::new(date(2026, 6, 1), date(2026, 6, 30))?;
    matinee.min_purchase = Some(amount(500));
    matinee.max_discount = Some(amount(200));

    let mut early_bird = fixed_terms(150, 50);
    early_bird.window = ValidityWindow::new(date(2026, 7, 1), date(2026, 7, 31))?;

    let spring = percentage_terms(10, 10);

    let coupons = [
        (1, "MATINEE", matinee),
        (2, "EARLYBIRD", early_bird),
        (3, "SPRING", spring),
    ]
    .into_iter()
    .map(|(id, code, terms)| {
        Coupon::create(
            CouponId(id),
            NewCoupon {
                code: code.to_string(),
                terms,
            },
        )
    })
    .collect::<Result<Vec<_>>>()?;

    CouponLedger::from_coupons(coupons)
}
