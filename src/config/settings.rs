//! Runtime settings from environment variables.
//!
//! Reads `COUPON_CATALOG_PATH`, `COUPON_EXPORT_PATH` and `COUPON_TODAY`. A `.env`
//! file is loaded by the binary before these are read.

use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Catalog location used when `COUPON_CATALOG_PATH` is not set.
pub const DEFAULT_CATALOG_PATH: &str = "coupons.toml";

/// Settings for a catalog load and export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// TOML catalog to seed the ledger from
    pub catalog_path: PathBuf,
    /// Where to write the CSV export; stdout when `None`
    pub export_path: Option<PathBuf>,
    /// Reference date override; today (UTC) when `None`
    pub today: Option<NaiveDate>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a variable.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `COUPON_TODAY` is not a `YYYY-MM-DD` date.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup("COUPON_CATALOG_PATH")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from);

        let export_path = lookup("COUPON_EXPORT_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let today = lookup("COUPON_TODAY")
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| Error::Config {
                    message: format!("COUPON_TODAY must be YYYY-MM-DD, got {value:?}: {e}"),
                })
            })
            .transpose()?;

        Ok(Self {
            catalog_path,
            export_path,
            today,
        })
    }

    /// The date statuses are computed against.
    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}
