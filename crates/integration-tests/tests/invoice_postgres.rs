//! `PgInvoiceStore` and the mutation service against a real `PostgreSQL`.
//!
//! These tests require `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`) pointing at
//! a disposable database. Migrations are applied on connect.
//!
//! Run with: cargo test -p tally-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;
use tally_core::{Cents, InvoiceId, InvoiceStatus};
use tally_dashboard::cache::PageCache;
use tally_dashboard::config::CacheConfig;
use tally_dashboard::db::{self, InvoiceStore, PgInvoiceStore};
use tally_dashboard::models::InvoiceForm;
use tally_dashboard::services::{ActionOutcome, INVOICES_PATH, InvoiceService};

async fn store() -> PgInvoiceStore {
    let url = std::env::var("DASHBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("DASHBOARD_DATABASE_URL or DATABASE_URL must be set");
    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("../dashboard/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PgInvoiceStore::new(pool)
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_insert_update_delete_roundtrip() {
    let store = store().await;
    let today = Utc::now().date_naive();

    let draft = InvoiceForm::new("cust_pg", "45.50", "pending").parse().unwrap();
    let created = store.insert(&draft, today).await.unwrap();
    assert_eq!(created.amount, Cents::from_raw(4550));
    assert_eq!(created.date, today);

    let changed = InvoiceForm::new("cust_pg_2", "10", "paid").parse().unwrap();
    assert_eq!(store.update(&created.id, &changed).await.unwrap(), 1);

    let fetched = store.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.date, created.date);
    assert_eq!(fetched.customer_id.as_str(), "cust_pg_2");
    assert_eq!(fetched.status, InvoiceStatus::Paid);

    assert_eq!(store.delete(&created.id).await.unwrap(), 1);
    assert!(store.get(&created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_missing_ids_affect_no_rows() {
    let store = store().await;
    let id = InvoiceId::new("nonexistent");
    let draft = InvoiceForm::new("cust_pg", "1", "paid").parse().unwrap();

    assert_eq!(store.update(&id, &draft).await.unwrap(), 0);
    assert_eq!(store.delete(&id).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_service_create_revalidates_listing() {
    let store: Arc<dyn InvoiceStore> = Arc::new(store().await);
    let pages = PageCache::new(CacheConfig::default());
    let generation = pages.generation(INVOICES_PATH).await;
    pages
        .store_invoice_list(INVOICES_PATH, generation, Arc::new(store.list().await.unwrap()))
        .await;

    let service = InvoiceService::new(store, Arc::new(pages.clone()));
    let outcome = service
        .create(&InvoiceForm::new("cust_pg", "3.25", "pending"))
        .await;

    assert!(matches!(outcome, ActionOutcome::Redirect { target } if target == INVOICES_PATH));
    assert!(!pages.contains(INVOICES_PATH).await);
}
