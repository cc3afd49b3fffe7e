//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (store reachable)
//!
//! # Invoices
//! GET    /dashboard/invoices              - Invoice listing (JSON, cached)
//! POST   /dashboard/invoices              - Create invoice (form)
//! GET    /dashboard/invoices/{id}         - Invoice detail (JSON)
//! POST   /dashboard/invoices/{id}         - Update invoice (form)
//! DELETE /dashboard/invoices/{id}         - Delete invoice
//! POST   /dashboard/invoices/{id}/delete  - Delete invoice (from an HTML form)
//! ```

pub mod invoices;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the invoice routes router.
pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::index).post(invoices::create))
        .route(
            "/{id}",
            get(invoices::show)
                .post(invoices::update)
                .delete(invoices::delete),
        )
        .route("/{id}/delete", post(invoices::delete))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/dashboard/invoices", invoice_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the invoice store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
