//! Core types for Tally.
//!
//! This module provides type-safe wrappers for invoice domain concepts.

pub mod id;
pub mod invoice;
pub mod money;
pub mod status;

pub use id::{CustomerId, InvoiceId};
pub use invoice::{Invoice, InvoiceDraft};
pub use money::{AmountError, Cents};
pub use status::{InvoiceStatus, ParseStatusError};
