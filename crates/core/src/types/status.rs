//! Invoice status.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a valid [`InvoiceStatus`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid invoice status: {0}")]
pub struct ParseStatusError(pub String);

/// Payment status of an invoice.
///
/// Exactly two values exist. No transition rules are enforced between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// The value stored in the `status` column and submitted by forms.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = ParseStatusError;

    /// Parse a status. Matching is exact: `"Paid"` or `" paid"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(ParseStatusError(s.to_owned())),
        }
    }
}
