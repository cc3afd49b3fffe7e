//! Domain models for the dashboard.
//!
//! Persisted invoice types live in `tally_core`; this module holds the
//! request-side shapes that have not been validated yet.

pub mod invoice_form;

pub use invoice_form::{FieldErrors, InvoiceForm};
