//! Tally Dashboard library.
//!
//! This crate provides the invoice dashboard as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires it to `PostgreSQL`,
//! tracing, and Sentry.
//!
//! # Modules
//!
//! - [`services`] - The invoice mutation service (create, update, delete)
//! - [`models`] - Form input and validation
//! - [`db`] - Invoice stores (`PostgreSQL` and in-memory)
//! - [`cache`] - Route page cache and its revalidation hook
//! - [`routes`] - Axum handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the full application router with tracing and request IDs.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
