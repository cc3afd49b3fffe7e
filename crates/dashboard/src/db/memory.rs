//! In-memory invoice store.
//!
//! Behaves like [`PgInvoiceStore`](super::PgInvoiceStore) for the statements the
//! dashboard issues: IDs are generated on insert, updates and deletes report
//! rows affected. Calling [`MemoryInvoiceStore::set_unavailable`] makes every
//! operation fail, which lets tests exercise the storage-failure paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use tally_core::{Invoice, InvoiceDraft, InvoiceId};

use super::{InvoiceStore, RepositoryError};

/// Invoice store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryInvoiceStore {
    invoices: RwLock<BTreeMap<InvoiceId, Invoice>>,
    unavailable: AtomicBool,
}

impl MemoryInvoiceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an invoice into the store as-is, keeping its ID and date.
    pub async fn seed(&self, invoice: Invoice) {
        self.invoices
            .write()
            .await
            .insert(invoice.id.clone(), invoice);
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored invoices.
    pub async fn len(&self) -> usize {
        self.invoices.read().await.len()
    }

    /// Whether the store holds no invoices.
    pub async fn is_empty(&self) -> bool {
        self.invoices.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "in-memory store switched off".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn insert(
        &self,
        draft: &InvoiceDraft,
        date: NaiveDate,
    ) -> Result<Invoice, RepositoryError> {
        self.check_available()?;

        let invoice = draft
            .clone()
            .into_invoice(InvoiceId::new(Uuid::new_v4().to_string()), date);
        self.invoices
            .write()
            .await
            .insert(invoice.id.clone(), invoice.clone());

        Ok(invoice)
    }

    async fn update(&self, id: &InvoiceId, draft: &InvoiceDraft) -> Result<u64, RepositoryError> {
        self.check_available()?;

        let mut invoices = self.invoices.write().await;
        let Some(invoice) = invoices.get_mut(id) else {
            return Ok(0);
        };
        invoice.customer_id = draft.customer_id.clone();
        invoice.amount = draft.amount;
        invoice.status = draft.status;

        Ok(1)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError> {
        self.check_available()?;

        let removed = self.invoices.write().await.remove(id);
        Ok(u64::from(removed.is_some()))
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        self.check_available()?;

        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        self.check_available()?;

        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        // Same ordering as the SQL store: newest date first, then id
        invoices.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(invoices)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
