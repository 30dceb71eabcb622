//! Coupon catalog loading from coupons.toml
//!
//! The catalog is the static set of sample coupons the admin panel starts with.
//! Each `[[coupons]]` table becomes one coupon; ids are assigned from the table's
//! position, starting at 1. Dates must be quoted strings (`"2026-06-01"`).

use crate::{
    core::ledger::CouponLedger,
    entities::{Amount, Coupon, CouponId, CouponTerms, DiscountKind, ValidityWindow},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire coupons.toml file
#[derive(Debug, Deserialize)]
pub struct Catalog {
    /// Coupons to seed, in id order
    pub coupons: Vec<CouponSeed>,
}

/// Configuration for a single coupon
#[derive(Debug, Deserialize, Clone)]
pub struct CouponSeed {
    /// Redemption code
    pub code: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// `"percentage"` or `"fixed"`
    pub discount_type: DiscountKind,
    /// Percentage (0 to 100) or fixed amount
    pub discount_value: Amount,
    /// First active day
    pub start_date: NaiveDate,
    /// Last active day
    pub end_date: NaiveDate,
    /// Maximum number of redemptions
    pub usage_limit: u32,
    /// Redemptions already made, for sample data carried over from elsewhere
    #[serde(default)]
    pub usage_count: u32,
    /// Minimum subtotal
    pub min_purchase: Option<Amount>,
    /// Discount cap
    pub max_discount: Option<Amount>,
}

impl CouponSeed {
    /// Validates the seed and turns it into a coupon with the given id.
    ///
    /// # Errors
    /// Returns the same validation errors as [`Coupon::restore`].
    pub fn into_coupon(self, id: CouponId) -> Result<Coupon> {
        let terms = CouponTerms {
            description: self.description,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            window: ValidityWindow::new(self.start_date, self.end_date)?,
            usage_limit: self.usage_limit,
            min_purchase: self.min_purchase,
            max_discount: self.max_discount,
        };
        Coupon::restore(id, self.code, terms, self.usage_count)
    }
}

impl Catalog {
    /// Builds a ledger from the catalog, numbering coupons from 1.
    ///
    /// # Errors
    /// Fails on the first invalid seed or duplicate code.
    pub fn into_ledger(self) -> Result<CouponLedger> {
        let coupons = (1_u64..)
            .zip(self.coupons)
            .map(|(id, seed)| seed.into_coupon(CouponId(id)))
            .collect::<Result<Vec<_>>>()?;

        let ledger = CouponLedger::from_coupons(coupons)?;
        info!(coupons = ledger.len(), "Coupon ledger seeded from catalog");
        Ok(ledger)
    }
}

/// Loads the coupon catalog from a TOML file
///
/// # Arguments
/// * `path` - Path to the coupons.toml file
///
/// # Errors
/// Returns [`Error::Config`] if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or amounts are negative
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading coupon catalog from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog {}: {e}", path_ref.display()),
    })?;

    parse_catalog(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog {}: {e}", path_ref.display()),
    })
}

/// Loads the coupon catalog from the default location (./coupons.toml)
pub fn load_default_catalog() -> Result<Catalog> {
    load_catalog(super::settings::DEFAULT_CATALOG_PATH)
}

fn parse_catalog(contents: &str) -> std::result::Result<Catalog, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::status::resolve_status;
    use crate::entities::CouponStatus;
    use crate::test_utils::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [[coupons]]
        code = "WELCOME20"
        description = "20% off your first booking"
        discount_type = "percentage"
        discount_value = 20
        start_date = "2026-01-01"
        end_date = "2026-12-31"
        usage_limit = 1000
        usage_count = 245
        min_purchase = 500
        max_discount = 200

        [[coupons]]
        code = "FLAT100"
        discount_type = "fixed"
        discount_value = 100
        start_date = "2026-11-01"
        end_date = "2026-11-30"
        usage_limit = 500
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.coupons.len(), 2);
        assert_eq!(catalog.coupons[0].code, "WELCOME20");
        assert_eq!(catalog.coupons[0].usage_count, 245);
        assert_eq!(catalog.coupons[0].min_purchase, Some(amount(500)));

        assert_eq!(catalog.coupons[1].discount_type, DiscountKind::Fixed);
        assert!(catalog.coupons[1].description.is_empty());
        assert_eq!(catalog.coupons[1].usage_count, 0);
        assert!(catalog.coupons[1].max_discount.is_none());
    }

    #[test]
    fn test_catalog_into_ledger_assigns_ids() -> Result<()> {
        let ledger = parse_catalog(SAMPLE).unwrap().into_ledger()?;

        let welcome = ledger.get("WELCOME20").unwrap();
        assert_eq!(welcome.id(), CouponId(1));
        assert_eq!(welcome.usage_count(), 245);
        assert_eq!(ledger.get("FLAT100").unwrap().id(), CouponId(2));

        let today = date(2026, 10, 18);
        assert_eq!(resolve_status(&welcome, today), CouponStatus::Active);
        Ok(())
    }

    #[test]
    fn test_negative_amount_fails_to_parse() {
        let bad = r#"
            [[coupons]]
            code = "NEG"
            discount_type = "fixed"
            discount_value = -10
            start_date = "2026-01-01"
            end_date = "2026-01-31"
            usage_limit = 5
        "#;
        assert!(parse_catalog(bad).is_err());
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let dupes = r#"
            [[coupons]]
            code = "TWIN"
            discount_type = "fixed"
            discount_value = 10
            start_date = "2026-01-01"
            end_date = "2026-01-31"
            usage_limit = 5

            [[coupons]]
            code = "TWIN"
            discount_type = "percentage"
            discount_value = 10
            start_date = "2026-01-01"
            end_date = "2026-01-31"
            usage_limit = 5
        "#;
        let result = parse_catalog(dupes).unwrap().into_ledger();
        assert!(matches!(result, Err(Error::DuplicateCode { .. })));
    }

    #[test]
    fn test_load_catalog_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;

        let catalog = load_catalog(file.path())?;
        assert_eq!(catalog.coupons.len(), 2);

        let missing = load_catalog("/definitely/not/here/coupons.toml");
        assert!(matches!(missing, Err(Error::Config { .. })));
        Ok(())
    }

    #[test]
    fn test_load_default_catalog() -> Result<()> {
        // cargo runs tests from the package root, next to coupons.toml
        let catalog = load_default_catalog()?;
        let codes: Vec<_> = catalog.coupons.iter().map(|seed| seed.code.as_str()).collect();
        assert_eq!(codes, ["WELCOME20", "FLAT100", "MATINEE15", "HOLIDAY50"]);
        Ok(())
    }

    #[test]
    fn test_shipped_catalog_is_valid() -> Result<()> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("coupons.toml");
        let ledger = load_catalog(path)?.into_ledger()?;

        let summary = ledger.status_summary(date(2026, 10, 18));
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(summary.expired, 1);

        // MATINEE15 is fully redeemed in the sample data
        assert_eq!(ledger.redeem("MATINEE15").ok(), None);
        Ok(())
    }
}
