//! Business logic services for the dashboard.

pub mod invoices;

pub use invoices::{ActionOutcome, INVOICES_PATH, InvoiceService};
