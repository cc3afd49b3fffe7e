//! Integration tests for Tally.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no external services)
//! cargo test -p tally-integration-tests
//!
//! # Tests against PostgreSQL and a running dashboard
//! cargo test -p tally-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `invoice_actions` - Mutations through the full router on an in-memory store
//! - `listing_cache` - Listing reads racing writes
//! - `invoice_postgres` - `PgInvoiceStore` against a real database
//! - `dashboard_live` - Smoke tests against a running dashboard server

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tally_dashboard::config::CacheConfig;
use tally_dashboard::db::MemoryInvoiceStore;
use tally_dashboard::state::AppState;

/// Router wired to an in-memory store, plus handles for inspecting it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryInvoiceStore>,
    pub state: AppState,
}

impl TestApp {
    /// Build the full dashboard router over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryInvoiceStore::new());
        let state = AppState::new(store.clone(), CacheConfig::default());
        let router = tally_dashboard::app(state.clone());

        Self {
            router,
            store,
            state,
        }
    }

    /// Send a request with an empty body.
    pub async fn send(&self, method: Method, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(empty_request(method, uri))
            .await
            .unwrap()
    }

    /// `GET` a path.
    pub async fn get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri).await
    }

    /// `POST` a url-encoded form.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        self.router
            .clone()
            .oneshot(form_request(uri, fields))
            .await
            .unwrap()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a request with an empty body.
#[must_use]
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a `POST` carrying url-encoded form fields.
#[must_use]
pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(fields)))
        .unwrap()
}

/// Percent-encode form fields.
#[must_use]
pub fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
