//! Tally Core - Shared domain types.
//!
//! This crate provides the types used across all Tally components:
//! - `dashboard` - Invoice dashboard server (mutation service, listing, routes)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Database encoding is available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for invoice IDs, customer IDs, amounts, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
