//! Decimal money values.
//!
//! Shipping costs, line item totals and rule thresholds are all `Decimal`.
//! Floats are only produced at the very edge, when benchmark data is
//! serialized for reporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Whether the amount lies in `[min, max]`. Missing bounds are open.
    #[must_use]
    pub fn within(&self, min: Option<Decimal>, max: Option<Decimal>) -> bool {
        min.is_none_or(|min| self.amount >= min) && max.is_none_or(|max| self.amount <= max)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_bounds_inclusive() {
        let price = Price::new(Decimal::new(5000, 2), CurrencyCode::EUR);
        assert!(price.within(Some(Decimal::new(50, 0)), Some(Decimal::new(50, 0))));
        assert!(price.within(None, None));
        assert!(!price.within(Some(Decimal::new(5001, 2)), None));
        assert!(!price.within(None, Some(Decimal::new(4999, 2))));
    }
}
