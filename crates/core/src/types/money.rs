//! Money with decimal arithmetic and currency awareness.
//!
//! All storefront arithmetic (subtotals, tier discounts) happens in the
//! display currency; there is no cross-currency conversion anywhere.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount paired with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Format for display (e.g., `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the shop sells in.
///
/// Unknown codes from the remote platform collapse to [`CurrencyCode::Other`]
/// rather than failing deserialization; they still render with a bare `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    #[serde(other)]
    Other,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD | Self::Other => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::Other => "???",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_cents() {
        let price = Money::new(Decimal::new(199, 1), CurrencyCode::USD);
        assert_eq!(price.display(), "$19.90");

        let price = Money::new(Decimal::new(1250, 0), CurrencyCode::EUR);
        assert_eq!(price.display(), "\u{20ac}1250.00");
    }

    #[test]
    fn zero_has_zero_amount() {
        assert_eq!(Money::zero(CurrencyCode::USD).amount, Decimal::ZERO);
    }

    #[test]
    fn unknown_currency_deserializes_to_other() {
        let money: Money =
            serde_json::from_str(r#"{"amount":"10.00","currency":"JPY"}"#).expect("deserialize");
        assert_eq!(money.currency, CurrencyCode::Other);
    }

    #[test]
    fn currency_deserializes_from_code() {
        let code: CurrencyCode = serde_json::from_str("\"GBP\"").expect("deserialize");
        assert_eq!(code, CurrencyCode::GBP);
        assert_eq!(code.symbol(), "\u{a3}");
    }
}
