//! Type-safe monetary amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// The Storefront API returns amounts as decimal strings; they are kept as
/// [`Decimal`] so no precision is lost to floating point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        let money = Money::new(Decimal::new(199, 1), "USD");
        assert_eq!(money.to_string(), "19.90 USD");
    }

    #[test]
    fn test_decodes_api_string_amount() {
        let money: Money =
            serde_json::from_str(r#"{"amount":"24.00","currency_code":"USD"}"#).unwrap();
        assert_eq!(money.amount, Decimal::new(2400, 2));
    }

    #[test]
    fn test_zero_display() {
        assert_eq!(Money::zero("EUR").to_string(), "0.00 EUR");
    }
}
