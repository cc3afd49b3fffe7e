//! Invoice mutation service.
//!
//! Create, update and delete share one pipeline:
//!
//! 1. validate and coerce the form (create/update)
//! 2. run a single store statement
//! 3. on success, revalidate the invoice listing route
//! 4. return an [`ActionOutcome`] telling the caller what to do next
//!
//! Storage failures are logged and reported with a fixed per-operation
//! message; the underlying cause never reaches the user.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use tally_core::InvoiceId;

use crate::cache::RouteCache;
use crate::db::InvoiceStore;
use crate::models::{FieldErrors, InvoiceForm};

/// Route of the invoice listing page.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub const CREATE_FAILED: &str = "Database Error: Failed to create the invoice.";
pub const UPDATE_FAILED: &str = "Database Error: Failed to update the invoice.";
pub const DELETE_FAILED: &str = "Database Error: Failed to delete the invoice.";
pub const DELETED: &str = "Deleted invoice.";
pub const CREATE_INVALID: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_INVALID: &str = "Missing Fields. Failed to Update Invoice.";

/// Result of an invoice mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The write succeeded; send the client to `target`.
    Redirect { target: &'static str },
    /// The write succeeded; stay on the current view.
    Success { message: &'static str },
    /// The store failed; nothing was written.
    Failed { message: &'static str },
    /// The form was rejected before reaching the store.
    Invalid {
        message: &'static str,
        errors: FieldErrors,
    },
}

impl ActionOutcome {
    /// User-facing message, if this outcome carries one.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Redirect { .. } => None,
            Self::Success { message } | Self::Failed { message } | Self::Invalid { message, .. } => {
                Some(*message)
            }
        }
    }
}

/// Validated-write pipeline for invoices.
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn RouteCache>,
}

impl InvoiceService {
    /// Create a service over the given store and route cache.
    #[must_use]
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn RouteCache>) -> Self {
        Self { store, cache }
    }

    /// Create an invoice dated today (UTC).
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &InvoiceForm) -> ActionOutcome {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                warn!(?errors, "Rejected invoice form");
                return ActionOutcome::Invalid {
                    message: CREATE_INVALID,
                    errors,
                };
            }
        };

        let date = Utc::now().date_naive();
        match self.store.insert(&draft, date).await {
            Ok(invoice) => {
                info!(
                    invoice_id = %invoice.id,
                    customer_id = %invoice.customer_id,
                    amount = invoice.amount.as_i32(),
                    "Invoice created"
                );
            }
            Err(e) => {
                error!(error = %e, "Failed to create invoice");
                return ActionOutcome::Failed {
                    message: CREATE_FAILED,
                };
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        ActionOutcome::Redirect {
            target: INVOICES_PATH,
        }
    }

    /// Overwrite customer, amount and status of an invoice.
    ///
    /// An unknown `id` is not an error: nothing is written and the caller is
    /// still redirected.
    #[instrument(skip(self, form), fields(invoice_id = %id))]
    pub async fn update(&self, id: &InvoiceId, form: &InvoiceForm) -> ActionOutcome {
        let draft = match form.parse() {
            Ok(draft) => draft,
            Err(errors) => {
                warn!(?errors, "Rejected invoice form");
                return ActionOutcome::Invalid {
                    message: UPDATE_INVALID,
                    errors,
                };
            }
        };

        match self.store.update(id, &draft).await {
            Ok(0) => warn!("Update matched no invoice"),
            Ok(_) => info!("Invoice updated"),
            Err(e) => {
                error!(error = %e, "Failed to update invoice");
                return ActionOutcome::Failed {
                    message: UPDATE_FAILED,
                };
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        ActionOutcome::Redirect {
            target: INVOICES_PATH,
        }
    }

    /// Delete an invoice. Deleting an unknown `id` still reports success.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn delete(&self, id: &InvoiceId) -> ActionOutcome {
        match self.store.delete(id).await {
            Ok(0) => warn!("Delete matched no invoice"),
            Ok(_) => info!("Invoice deleted"),
            Err(e) => {
                error!(error = %e, "Failed to delete invoice");
                return ActionOutcome::Failed {
                    message: DELETE_FAILED,
                };
            }
        }

        self.cache.revalidate_path(INVOICES_PATH).await;
        ActionOutcome::Success { message: DELETED }
    }
}

impl std::fmt::Debug for InvoiceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceService").finish_non_exhaustive()
    }
}
