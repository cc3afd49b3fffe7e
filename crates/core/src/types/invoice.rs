//! Invoice domain types.
//!
//! These are validated domain objects, separate from database row types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cents, CustomerId, InvoiceId, InvoiceStatus};

/// A persisted invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Storage-generated identifier. Never changes.
    pub id: InvoiceId,
    /// Customer the invoice is billed to.
    pub customer_id: CustomerId,
    /// Amount in cents.
    pub amount: Cents,
    /// Payment status.
    pub status: InvoiceStatus,
    /// Day the invoice was created (UTC). Never updated.
    pub date: NaiveDate,
}

/// The user-editable fields of an invoice after validation.
///
/// Used for both inserts and updates; `id` and `date` are never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Build the persisted invoice for this draft.
    #[must_use]
    pub fn into_invoice(self, id: InvoiceId, date: NaiveDate) -> Invoice {
        Invoice {
            id,
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }
}
