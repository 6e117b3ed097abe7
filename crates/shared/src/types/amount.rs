//! Monetary amount with two-decimal fidelity.
//!
//! CRITICAL: Never use floating-point for expenditure amounts.
//! This type wraps `rust_decimal::Decimal` and pins the scale to two places.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors from parsing an amount at an entry boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input is not a decimal number.
    #[error("amount is not a valid number")]
    Malformed,

    /// The input is negative.
    #[error("amount must be non-negative")]
    Negative,

    /// The input has more than two decimal places.
    #[error("amount must have at most two decimal places")]
    TooPrecise,
}

/// A non-negative monetary amount stored with exactly two decimal places.
///
/// `"150.5"` parses to `150.50`; `"150.505"` is rejected rather than
/// rounded, so nothing is silently lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero, at two-decimal scale.
    #[must_use]
    pub fn zero() -> Self {
        let mut value = Decimal::ZERO;
        value.rescale(2);
        Self(value)
    }

    /// Parses an amount from client input.
    ///
    /// # Errors
    ///
    /// Returns `AmountError` when the input is not a number, is negative, or
    /// carries more than two decimal places.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let value: Decimal = input.trim().parse().map_err(|_| AmountError::Malformed)?;
        Self::try_from_decimal(value)
    }

    /// Validates and rescales a decimal into an amount.
    ///
    /// # Errors
    ///
    /// Returns `AmountError` when the value is negative or carries more than
    /// two decimal places.
    pub fn try_from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_zero() {
            // Catches "-0" too; zero is zero.
            return Ok(Self::zero());
        }
        if value.is_sign_negative() {
            return Err(AmountError::Negative);
        }
        if value.normalize().scale() > 2 {
            return Err(AmountError::TooPrecise);
        }
        let mut value = value;
        value.rescale(2);
        Ok(Self(value))
    }

    /// Wraps a decimal already persisted by the repository.
    ///
    /// Stored values passed validation on the way in; this only pins the
    /// scale back to two places.
    #[must_use]
    pub fn from_stored(value: Decimal) -> Self {
        let mut value = value;
        value.rescale(2);
        Self(value)
    }

    /// Returns the inner decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("150.5", "150.50")]
    #[case("150.50", "150.50")]
    #[case("0", "0.00")]
    #[case("0.00", "0.00")]
    #[case(" 75.25 ", "75.25")]
    #[case("1000", "1000.00")]
    fn test_parse_rescales_to_two_places(#[case] input: &str, #[case] expected: &str) {
        let amount = Amount::parse(input).unwrap();
        assert_eq!(amount.to_string(), expected);
    }

    #[rstest]
    #[case("-1", AmountError::Negative)]
    #[case("-0.01", AmountError::Negative)]
    #[case("1.505", AmountError::TooPrecise)]
    #[case("0.001", AmountError::TooPrecise)]
    #[case("abc", AmountError::Malformed)]
    #[case("", AmountError::Malformed)]
    #[case("1.5.0", AmountError::Malformed)]
    fn test_parse_rejects_invalid(#[case] input: &str, #[case] expected: AmountError) {
        assert_eq!(Amount::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn test_trailing_zeros_beyond_two_places_are_fine() {
        // 1.5000 normalizes to 1.5, which fits in two places.
        let amount = Amount::parse("1.5000").unwrap();
        assert_eq!(amount.to_string(), "1.50");
    }

    #[test]
    fn test_serializes_as_two_place_string() {
        let amount = Amount::parse("150.5").unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"150.50\"");
    }

    #[test]
    fn test_zero() {
        assert!(Amount::zero().is_zero());
        assert_eq!(Amount::zero().to_string(), "0.00");
    }

    #[test]
    fn test_from_stored_pins_scale() {
        let amount = Amount::from_stored(dec!(150.5));
        assert_eq!(amount.value(), dec!(150.50));
        assert_eq!(amount.to_string(), "150.50");
    }
}
