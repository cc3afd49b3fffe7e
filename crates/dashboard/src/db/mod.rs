//! Database operations for the dashboard `PostgreSQL`.
//!
//! ## Tables
//!
//! - `invoices` - Invoices created and edited from the dashboard
//!
//! # Migrations
//!
//! Migrations are stored in `crates/dashboard/migrations/` and run via:
//! ```bash
//! cargo run -p tally-cli -- migrate
//! ```
//!
//! # Stores
//!
//! The mutation service talks to storage through [`InvoiceStore`]:
//! - [`PgInvoiceStore`] - production store backed by `PostgreSQL`
//! - [`MemoryInvoiceStore`] - in-process store for tests and local demos

pub mod invoices;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use tally_core::{Invoice, InvoiceDraft, InvoiceId};

pub use invoices::PgInvoiceStore;
pub use memory::MemoryInvoiceStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for invoices.
///
/// Each method is a single standalone statement; no transactions span calls.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice dated `date`. The store generates the ID.
    async fn insert(
        &self,
        draft: &InvoiceDraft,
        date: NaiveDate,
    ) -> Result<Invoice, RepositoryError>;

    /// Overwrite customer, amount and status of the invoice with `id`.
    ///
    /// Returns the number of rows affected (0 when no invoice matched).
    async fn update(&self, id: &InvoiceId, draft: &InvoiceDraft) -> Result<u64, RepositoryError>;

    /// Remove the invoice with `id`.
    ///
    /// Returns the number of rows affected (0 when no invoice matched).
    async fn delete(&self, id: &InvoiceId) -> Result<u64, RepositoryError>;

    /// Fetch a single invoice.
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError>;

    /// All invoices, newest first.
    async fn list(&self) -> Result<Vec<Invoice>, RepositoryError>;

    /// Check that the store can serve requests.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
