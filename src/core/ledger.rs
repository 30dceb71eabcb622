//! Coupon ledger - the authoritative in-process coupon collection.
//!
//! Coupons are keyed by their case-sensitive code, so a lookup returns at most
//! one coupon. Each entry keeps its usage counter in an `AtomicU32` and redeems
//! with a compare-and-swap, so the capacity check and the increment are one
//! indivisible step and concurrent redemptions can never overshoot the usage
//! limit. Redemptions hold a shared read guard on the coupon's terms while they
//! swap; administrative edits take the write guard, which keeps a limit change
//! from interleaving with a redemption.
//!
//! The ledger is `Send + Sync`; share it between tasks with an `Arc`.

use crate::{
    core::{
        discount::compute_discount, eligibility::check_eligibility, redemption::Redemption,
        status::resolve_status,
    },
    entities::{Amount, Coupon, CouponRecord, CouponStatus, CouponTerms, Eligibility},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::{
    collections::BTreeMap,
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard,
        atomic::{AtomicU32, Ordering},
    },
};
use tracing::{debug, info, instrument, warn};

/// One coupon in the ledger.
#[derive(Debug)]
struct Entry {
    /// Identity and terms. Its own usage count goes stale; `uses` is authoritative.
    coupon: RwLock<Coupon>,
    uses: AtomicU32,
}

impl Entry {
    fn new(coupon: Coupon) -> Self {
        Self {
            uses: AtomicU32::new(coupon.usage_count()),
            coupon: RwLock::new(coupon),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Coupon> {
        self.coupon.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Coupon {
        let coupon = self.read();
        coupon
            .clone()
            .with_usage_count(self.uses.load(Ordering::Acquire))
    }

    /// Claims one use with a compare-and-swap loop. `coupon` must be the read
    /// guard's content so the usage limit cannot change during the swap.
    fn claim(&self, coupon: &Coupon) -> Result<u32> {
        let limit = coupon.usage_limit();
        self.uses
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (used < limit).then_some(used + 1)
            })
            .map(|previous| previous + 1)
            .map_err(|used| {
                warn!(code = coupon.code(), used, limit, "Coupon usage limit reached");
                Error::LimitExceeded {
                    code: coupon.code().to_string(),
                    usage_limit: limit,
                }
            })
    }
}

/// Counts of coupons per status on a given day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Coupons whose window has not started
    pub upcoming: usize,
    /// Coupons inside their window
    pub active: usize,
    /// Coupons whose window has ended
    pub expired: usize,
}

impl StatusSummary {
    /// Total number of coupons counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.upcoming + self.active + self.expired
    }
}

/// Thread-safe authoritative collection of coupons.
#[derive(Debug, Default)]
pub struct CouponLedger {
    entries: RwLock<BTreeMap<String, Arc<Entry>>>,
}

impl CouponLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from existing coupons.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateCode`] or [`Error::DuplicateId`] on the first clash.
    pub fn from_coupons<I>(coupons: I) -> Result<Self>
    where
        I: IntoIterator<Item = Coupon>,
    {
        let ledger = Self::new();
        for coupon in coupons {
            ledger.insert(coupon)?;
        }
        Ok(ledger)
    }

    /// Adds a coupon. Codes and ids must be unique within the ledger.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateCode`] or [`Error::DuplicateId`].
    pub fn insert(&self, coupon: Coupon) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(coupon.code()) {
            warn!(code = coupon.code(), "Rejected duplicate coupon code");
            return Err(Error::DuplicateCode {
                code: coupon.code().to_string(),
            });
        }

        if entries.values().any(|entry| entry.read().id() == coupon.id()) {
            warn!(id = %coupon.id(), "Rejected duplicate coupon id");
            return Err(Error::DuplicateId { id: coupon.id() });
        }

        debug!(code = coupon.code(), id = %coupon.id(), "Coupon added to ledger");
        entries.insert(coupon.code().to_string(), Arc::new(Entry::new(coupon)));
        Ok(())
    }

    /// Number of coupons in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when the ledger holds no coupons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, code: &str) -> Result<Arc<Entry>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
            .ok_or_else(|| Error::CouponNotFound {
                code: code.to_string(),
            })
    }

    /// Returns a snapshot of the coupon with this exact code, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Coupon> {
        self.entry(code).ok().map(|entry| entry.snapshot())
    }

    /// Snapshots of every coupon, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Coupon> {
        let entries: Vec<Arc<Entry>> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut coupons: Vec<Coupon> = entries.iter().map(|entry| entry.snapshot()).collect();
        coupons.sort_by_key(Coupon::id);
        coupons
    }

    /// Replaces a coupon's editable terms. The usage count is never changed.
    ///
    /// # Errors
    /// Returns [`Error::CouponNotFound`] for an unknown code and
    /// [`Error::InvalidCoupon`] when the new terms are invalid or the new usage
    /// limit is below the redemptions already made.
    pub fn update(&self, code: &str, terms: CouponTerms) -> Result<Coupon> {
        let entry = self.entry(code)?;
        let mut coupon = entry.coupon.write().unwrap_or_else(PoisonError::into_inner);

        // No redemption can run while the write guard is held, so this count is stable.
        let mut updated = coupon
            .clone()
            .with_usage_count(entry.uses.load(Ordering::Acquire));
        updated.replace_terms(terms)?;
        *coupon = updated.clone();

        info!(code, "Coupon terms updated");
        Ok(updated)
    }

    /// Atomically records one use of the coupon and returns the new usage count.
    ///
    /// Only the usage limit is checked; see [`CouponLedger::apply`] for the full
    /// eligibility check.
    ///
    /// # Errors
    /// Returns [`Error::CouponNotFound`] for an unknown code and
    /// [`Error::LimitExceeded`] when no uses remain.
    #[instrument(level = "debug", skip(self))]
    pub fn redeem(&self, code: &str) -> Result<u32> {
        let entry = self.entry(code)?;
        let coupon = entry.read();
        let usage_count = entry.claim(&coupon)?;

        debug!(usage_count, "Coupon redeemed");
        Ok(usage_count)
    }

    /// Applies a coupon to a purchase: checks eligibility, computes the discount
    /// and atomically records the use.
    ///
    /// # Errors
    /// Returns [`Error::CouponNotFound`] for an unknown code,
    /// [`Error::NotRedeemable`] when the purchase is not eligible, and
    /// [`Error::LimitExceeded`] when the last use was taken by a concurrent caller
    /// between the check and the update.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&self, code: &str, subtotal: Amount, today: NaiveDate) -> Result<Redemption> {
        let entry = self.entry(code)?;
        let coupon = entry.read();
        let current = coupon
            .clone()
            .with_usage_count(entry.uses.load(Ordering::Acquire));

        if let Eligibility::Ineligible(reason) = check_eligibility(&current, subtotal, today) {
            debug!(%reason, "Coupon not applicable");
            return Err(Error::NotRedeemable {
                code: code.to_string(),
                reason,
            });
        }

        let discount = compute_discount(&current, subtotal);
        let usage_count = entry.claim(&coupon)?;

        debug!(%discount, usage_count, "Coupon applied");
        Ok(Redemption {
            code: current.code().to_string(),
            discount,
            usage_count,
        })
    }

    /// Counts coupons per status on `today`, recomputing every status.
    #[must_use]
    pub fn status_summary(&self, today: NaiveDate) -> StatusSummary {
        self.list()
            .iter()
            .fold(StatusSummary::default(), |mut summary, coupon| {
                match resolve_status(coupon, today) {
                    CouponStatus::Upcoming => summary.upcoming += 1,
                    CouponStatus::Active => summary.active += 1,
                    CouponStatus::Expired => summary.expired += 1,
                }
                summary
            })
    }

    /// Flat records for every coupon, ordered by id, with status as of `today`.
    #[must_use]
    pub fn export_records(&self, today: NaiveDate) -> Vec<CouponRecord> {
        self.list()
            .iter()
            .map(|coupon| coupon.to_record(today))
            .collect()
    }
}

/// Formats a status summary into a one-line human-readable string.
#[must_use]
pub fn format_status_summary(summary: &StatusSummary, today: NaiveDate) -> String {
    format!(
        "Coupons on {} - {} total | {} active | {} upcoming | {} expired",
        today.format("%Y-%m-%d"),
        summary.total(),
        summary.active,
        summary.upcoming,
        summary.expired
    )
}
