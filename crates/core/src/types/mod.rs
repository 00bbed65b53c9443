//! Core types for Artist Easel Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod bulk;
pub mod id;
pub mod money;

pub use bulk::{BulkPricingTier, TierDiscount};
pub use id::*;
pub use money::{CurrencyCode, Money};
