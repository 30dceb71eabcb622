/// Coupon catalog loading from coupons.toml
pub mod catalog;

/// Runtime settings from environment variables
pub mod settings;
