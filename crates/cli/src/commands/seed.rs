//! Seed the dashboard database with invoices from a YAML file.
//!
//! Every row is validated with the same rules as the dashboard form before
//! anything is written. A file with any invalid row inserts nothing.
//!
//! ```yaml
//! invoices:
//!   - customer_id: cust_1
//!     amount: "45.50"
//!     status: pending
//!     date: 2026-10-01   # optional, defaults to today (UTC)
//! ```

use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use tally_core::InvoiceDraft;
use tally_dashboard::db::{self, InvoiceStore, PgInvoiceStore, RepositoryError};
use tally_dashboard::models::InvoiceForm;

/// Errors from seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: DASHBOARD_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} invalid invoice rows")]
    Invalid(usize),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    invoices: Vec<SeedInvoice>,
}

#[derive(Debug, Deserialize)]
struct SeedInvoice {
    customer_id: String,
    amount: serde_yaml::Value,
    status: String,
    date: Option<NaiveDate>,
}

impl SeedInvoice {
    fn amount_text(&self) -> String {
        match &self.amount {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Insert every invoice in `path`. Returns how many were inserted.
///
/// # Errors
///
/// Returns `SeedError` if the file is unreadable or has invalid rows, or if
/// the database rejects an insert.
pub async fn invoices(path: &Path) -> Result<usize, SeedError> {
    info!(path = %path.display(), "Loading invoices from file");

    let content = tokio::fs::read_to_string(path).await?;
    let rows = parse_rows(&content, Utc::now().date_naive())?;
    info!(rows = rows.len(), "Seed file validated");

    let database_url = super::database_url().ok_or(SeedError::MissingDatabaseUrl)?;
    let store = PgInvoiceStore::new(db::create_pool(&database_url).await?);
    info!("Connected to database");

    for (draft, date) in &rows {
        let invoice = store.insert(draft, *date).await?;
        info!(invoice_id = %invoice.id, customer_id = %invoice.customer_id, "Inserted invoice");
    }

    Ok(rows.len())
}

/// Parse and validate a seed file. Rows without a date get `today`.
fn parse_rows(content: &str, today: NaiveDate) -> Result<Vec<(InvoiceDraft, NaiveDate)>, SeedError> {
    let file: SeedFile = serde_yaml::from_str(content)?;

    let mut rows = Vec::with_capacity(file.invoices.len());
    let mut invalid = 0;

    for (index, row) in file.invoices.iter().enumerate() {
        let form = InvoiceForm::new(&row.customer_id, &row.amount_text(), &row.status);
        match form.parse() {
            Ok(draft) => rows.push((draft, row.date.unwrap_or(today))),
            Err(errors) => {
                invalid += 1;
                for (field, messages) in errors {
                    error!(row = index + 1, field = %field, "{}", messages.join(" "));
                }
            }
        }
    }

    if invalid > 0 {
        return Err(SeedError::Invalid(invalid));
    }
    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tally_core::{Cents, InvoiceStatus};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_parse_rows() {
        let yaml = r#"
invoices:
  - customer_id: cust_1
    amount: "45.50"
    status: pending
  - customer_id: cust_2
    amount: 12
    status: paid
    date: 2026-01-31
"#;
        let rows = parse_rows(yaml, today()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.amount, Cents::from_raw(4550));
        assert_eq!(rows[0].1, today());
        assert_eq!(rows[1].0.status, InvoiceStatus::Paid);
        assert_eq!(rows[1].0.amount, Cents::from_raw(1200));
        assert_eq!(rows[1].1, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
    }

    #[test]
    fn test_invalid_rows_reject_whole_file() {
        let yaml = r#"
invoices:
  - customer_id: cust_1
    amount: "1"
    status: paid
  - customer_id: cust_2
    amount: "1"
    status: overdue
  - customer_id: ""
    amount: "-4"
    status: paid
"#;
        let err = parse_rows(yaml, today()).unwrap_err();
        assert!(matches!(err, SeedError::Invalid(2)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_rows("invoices: 3", today()).unwrap_err();
        assert!(matches!(err, SeedError::Yaml(_)));
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let content = include_str!("../../seed/invoices.yaml");
        assert!(!parse_rows(content, today()).unwrap().is_empty());
    }
}
