//! Invoice form input and validation.
//!
//! Forms arrive as untyped key/value pairs. [`InvoiceForm`] accepts whatever
//! the client sent, and [`InvoiceForm::parse`] turns it into an
//! [`InvoiceDraft`] or a per-field error map.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use tally_core::{AmountError, Cents, CustomerId, InvoiceDraft, InvoiceStatus};

const CUSTOMER_MESSAGE: &str = "Please select a customer.";
const AMOUNT_MESSAGE: &str = "Please enter an amount.";
const NEGATIVE_AMOUNT_MESSAGE: &str = "Please enter an amount of $0 or more.";
const AMOUNT_RANGE_MESSAGE: &str = "Amount is too large.";
const STATUS_MESSAGE: &str = "Please select an invoice status.";

/// Validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Raw invoice form as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoiceForm {
    #[serde(rename = "customerId", default)]
    #[validate(
        required(message = "Please select a customer."),
        length(min = 1, message = "Please select a customer.")
    )]
    pub customer_id: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please enter an amount."),
        custom(function = "validate_amount")
    )]
    pub amount: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Please select an invoice status."),
        custom(function = "validate_status")
    )]
    pub status: Option<String>,
}

impl InvoiceForm {
    /// Build a form from its three fields.
    #[must_use]
    pub fn new(customer_id: &str, amount: &str, status: &str) -> Self {
        Self {
            customer_id: Some(customer_id.to_owned()),
            amount: Some(amount.to_owned()),
            status: Some(status.to_owned()),
        }
    }

    /// Validate and coerce the form into an [`InvoiceDraft`].
    ///
    /// # Errors
    ///
    /// Returns the messages for every invalid field.
    pub fn parse(&self) -> Result<InvoiceDraft, FieldErrors> {
        self.validate().map_err(|errors| field_errors(&errors))?;

        let (Some(customer_id), Some(amount), Some(status)) =
            (&self.customer_id, &self.amount, &self.status)
        else {
            return Err(missing_fields(self));
        };

        let amount = parse_cents(amount).map_err(|e| single("amount", e))?;
        let status = InvoiceStatus::from_str(status).map_err(|_| single("status", STATUS_MESSAGE))?;

        Ok(InvoiceDraft {
            customer_id: CustomerId::new(customer_id.as_str()),
            amount,
            status,
        })
    }
}

/// Coerce a submitted amount into cents.
///
/// Accepts plain decimals (`"45.50"`) and scientific notation (`"4.55e1"`),
/// with surrounding whitespace ignored.
fn parse_cents(raw: &str) -> Result<Cents, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AMOUNT_MESSAGE);
    }

    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AMOUNT_MESSAGE)?;

    Cents::from_major_units(amount).map_err(|e| match e {
        AmountError::Negative => NEGATIVE_AMOUNT_MESSAGE,
        AmountError::OutOfRange => AMOUNT_RANGE_MESSAGE,
    })
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    parse_cents(amount)
        .map(|_| ())
        .map_err(|message| ValidationError::new("amount").with_message(Cow::Borrowed(message)))
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    InvoiceStatus::from_str(status)
        .map(|_| ())
        .map_err(|_| ValidationError::new("status").with_message(Cow::Borrowed(STATUS_MESSAGE)))
}

/// Flatten validator output into field name -> messages.
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let name = match &*field {
            "customer_id" => "customerId".to_owned(),
            other => other.to_owned(),
        };
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| e.code.to_string(), ToString::to_string)
            })
            .collect::<Vec<_>>();
        out.entry(name).or_default().extend(messages);
    }
    out
}

fn single(field: &str, message: &str) -> FieldErrors {
    FieldErrors::from([(field.to_owned(), vec![message.to_owned()])])
}

fn missing_fields(form: &InvoiceForm) -> FieldErrors {
    let mut out = FieldErrors::new();
    if form.customer_id.is_none() {
        out.insert("customerId".to_owned(), vec![CUSTOMER_MESSAGE.to_owned()]);
    }
    if form.amount.is_none() {
        out.insert("amount".to_owned(), vec![AMOUNT_MESSAGE.to_owned()]);
    }
    if form.status.is_none() {
        out.insert("status".to_owned(), vec![STATUS_MESSAGE.to_owned()]);
    }
    out
}
