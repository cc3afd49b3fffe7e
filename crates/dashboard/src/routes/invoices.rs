//! Invoice route handlers.
//!
//! Mutations delegate to [`InvoiceService`](crate::services::InvoiceService)
//! and translate its [`ActionOutcome`] into an HTTP response. The listing is
//! served through the route page cache that those mutations revalidate.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::instrument;

use tally_core::{Invoice, InvoiceId};

use crate::error::{AppError, Result};
use crate::models::{FieldErrors, InvoiceForm};
use crate::services::{ActionOutcome, INVOICES_PATH};
use crate::state::AppState;

/// `{ "message": ... }` body for non-redirecting outcomes.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect { target } => Redirect::to(target).into_response(),
            Self::Success { message } => (
                StatusCode::OK,
                Json(MessageBody {
                    message,
                    errors: None,
                }),
            )
                .into_response(),
            Self::Failed { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    message,
                    errors: None,
                }),
            )
                .into_response(),
            Self::Invalid { message, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(MessageBody {
                    message,
                    errors: Some(errors),
                }),
            )
                .into_response(),
        }
    }
}

/// Invoice listing, newest first.
///
/// GET /dashboard/invoices
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let pages = state.pages();
    let invoices = if let Some(cached) = pages.invoice_list(INVOICES_PATH).await {
        cached
    } else {
        let generation = pages.generation(INVOICES_PATH).await;
        let fresh = Arc::new(state.store().list().await?);
        pages
            .store_invoice_list(INVOICES_PATH, generation, fresh.clone())
            .await;
        fresh
    };

    Ok(Json(invoices.as_slice()).into_response())
}

/// Single invoice.
///
/// GET /dashboard/invoices/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Invoice>> {
    let id = InvoiceId::new(id);
    state
        .store()
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("invoice {id}")))
}

/// Create an invoice from a submitted form.
///
/// POST /dashboard/invoices
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<InvoiceForm>) -> ActionOutcome {
    state.invoices().create(&form).await
}

/// Update an invoice from a submitted form.
///
/// POST /dashboard/invoices/{id}
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceForm>,
) -> ActionOutcome {
    state.invoices().update(&InvoiceId::new(id), &form).await
}

/// Delete an invoice.
///
/// DELETE /dashboard/invoices/{id}
/// POST   /dashboard/invoices/{id}/delete
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ActionOutcome {
    state.invoices().delete(&InvoiceId::new(id)).await
}
