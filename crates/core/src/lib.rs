//! Easel Core - Shared types library.
//!
//! This crate provides common types used by the Artist Easel Shop storefront:
//!
//! - [`types::id`] - Newtype wrappers for type-safe entity IDs
//! - [`types::money`] - Money with an ISO 4217 currency code
//! - [`types::bulk`] - Bulk (tiered) pricing and its arithmetic
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
