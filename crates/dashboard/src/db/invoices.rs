//! Invoice repository backed by `PostgreSQL`.
//!
//! Statements are parameterized runtime queries; rows are read into
//! [`InvoiceRow`] and converted into domain types.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use tally_core::{Cents, CustomerId, Invoice, InvoiceDraft, InvoiceId, InvoiceStatus};

use super::{InvoiceStore, RepositoryError};

/// Raw `invoices` row.
#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    customer_id: String,
    amount: i32,
    status: String,
    date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = RepositoryError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<InvoiceStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invoice {}: {e}", row.id))
        })?;

        if row.amount < 0 {
            return Err(RepositoryError::DataCorruption(format!(
                "invoice {}: negative amount {}",
                row.id, row.amount
            )));
        }

        Ok(Self {
            id: InvoiceId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            amount: Cents::from_raw(row.amount),
            status,
            date: row.date,
        })
    }
}

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct PgInvoiceStore {
    pool: PgPool,
}

impl PgInvoiceStore {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    #[instrument(skip(self, draft), fields(customer_id = %draft.customer_id))]
    async fn insert(
        &self,
        draft: &InvoiceDraft,
        date: NaiveDate,
    ) -> Result<Invoice, RepositoryError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, amount, status, date
            ",
        )
        .bind(&draft.customer_id)
        .bind(draft.amount)
        .bind(draft.status.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[instrument(skip(self, draft), fields(invoice_id = %id))]
    async fn update(&self, id: &InvoiceId, draft: &InvoiceDraft) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE invoices
            SET customer_id = $1, amount = $2, status = $3
            WHERE id = $4
            ",
        )
        .bind(&draft.customer_id)
        .bind(draft.amount)
        .bind(draft.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Invoice::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            ORDER BY date DESC, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
