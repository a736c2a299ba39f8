//! Calculated cart snapshot.
//!
//! The cart is calculated elsewhere; rules only read the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price};

/// A line item after price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedLineItem {
    /// Product number or voucher code.
    pub identifier: String,
    pub quantity: u32,
    pub total_price: Decimal,
}

/// Cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartPrice {
    /// Sum of product line items, before shipping.
    pub goods_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

/// A calculated cart as handed to rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatedCart {
    #[serde(default)]
    pub line_items: Vec<CalculatedLineItem>,
    #[serde(default)]
    pub price: CartPrice,
}

impl CalculatedCart {
    /// Goods price as a currency-tagged [`Price`].
    #[must_use]
    pub const fn goods_price(&self) -> Price {
        Price::new(self.price.goods_price, self.price.currency_code)
    }

    #[must_use]
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.line_items
            .iter()
            .any(|item| item.identifier == identifier)
    }
}
