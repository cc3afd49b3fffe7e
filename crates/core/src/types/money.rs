//! Invoice amounts in currency minor units.
//!
//! Amounts arrive from forms in major units (dollars) and are stored as
//! integer cents. The conversion is done in decimal arithmetic so that
//! inputs like `45.50` become exactly `4550`.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors converting a major-unit amount into [`Cents`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount does not fit in the storage column.
    #[error("amount is out of range")]
    OutOfRange,
}

/// A non-negative amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Cents(i32);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Convert a major-unit amount (e.g. dollars) into cents.
    ///
    /// Sub-cent precision is rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] for amounts below zero and
    /// [`AmountError::OutOfRange`] when the result does not fit in an `i32`.
    pub fn from_major_units(amount: Decimal) -> Result<Self, AmountError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AmountError::Negative);
        }

        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(AmountError::OutOfRange)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        cents.to_i32().map(Self).ok_or(AmountError::OutOfRange)
    }

    /// Wrap a raw cent value read back from storage.
    #[must_use]
    pub const fn from_raw(cents: i32) -> Self {
        Self(cents)
    }

    /// Get the underlying cent value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Amount in major units with two decimal places.
    #[must_use]
    pub fn to_major_units(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_major_units())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn test_from_major_units_exact() {
        assert_eq!(Cents::from_major_units(dec("45.50")), Ok(Cents::from_raw(4550)));
        assert_eq!(Cents::from_major_units(dec("10")), Ok(Cents::from_raw(1000)));
        assert_eq!(Cents::from_major_units(dec("0")), Ok(Cents::ZERO));
    }

    #[test]
    fn test_from_major_units_avoids_float_artifacts() {
        // 0.1 + 0.2 style inputs that drift in binary floating point
        assert_eq!(Cents::from_major_units(dec("0.29")), Ok(Cents::from_raw(29)));
        assert_eq!(Cents::from_major_units(dec("19.99")), Ok(Cents::from_raw(1999)));
    }

    #[test]
    fn test_from_major_units_rounds_sub_cent() {
        assert_eq!(Cents::from_major_units(dec("1.005")), Ok(Cents::from_raw(101)));
        assert_eq!(Cents::from_major_units(dec("1.004")), Ok(Cents::from_raw(100)));
    }

    #[test]
    fn test_from_major_units_rejects_negative() {
        assert_eq!(Cents::from_major_units(dec("-1")), Err(AmountError::Negative));
        assert_eq!(Cents::from_major_units(dec("-0.00")), Ok(Cents::ZERO));
    }

    #[test]
    fn test_from_major_units_rejects_out_of_range() {
        assert_eq!(
            Cents::from_major_units(dec("21474836.48")),
            Err(AmountError::OutOfRange)
        );
        assert_eq!(
            Cents::from_major_units(dec("21474836.47")),
            Ok(Cents::from_raw(i32::MAX))
        );
        assert_eq!(
            Cents::from_major_units(Decimal::MAX),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Cents::from_raw(4550).to_string(), "$45.50");
        assert_eq!(Cents::from_raw(7).to_string(), "$0.07");
    }
}
