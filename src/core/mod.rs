//! Core business logic - status, eligibility, discounts and redemption.
//!
//! The pure functions (`status`, `eligibility`, `discount`) have no side effects
//! and can be called from any thread. `ledger` owns the shared, mutable state.

/// Discount amount calculation
pub mod discount;
/// Purchase eligibility checks
pub mod eligibility;
/// CSV export and import of flat records
pub mod export;
/// Thread-safe coupon collection with atomic redemption
pub mod ledger;
/// Single-owner redemption
pub mod redemption;
/// Status derivation from the validity window
pub mod status;
