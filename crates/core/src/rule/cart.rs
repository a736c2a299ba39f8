//! Cart-content predicates.

use rust_decimal::Decimal;

use super::{Match, RuleScope};

pub(super) fn goods_price_within(
    scope: &RuleScope<'_>,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Match {
    let price = scope.cart.goods_price();
    Match::when(
        price.within(min, max),
        format!("Goods price {} is out of range", price.amount),
    )
}

pub(super) fn any_line_item(scope: &RuleScope<'_>, identifiers: &[String]) -> Match {
    Match::when(
        identifiers
            .iter()
            .any(|identifier| scope.cart.contains_identifier(identifier)),
        "None of the required line items is in the cart",
    )
}

#[cfg(test)]
mod tests {
    use super::super::Rule;
    use super::super::test_support::{context, date};
    use super::*;
    use crate::cart::{CalculatedCart, CalculatedLineItem, CartPrice};

    fn cart() -> CalculatedCart {
        CalculatedCart {
            line_items: vec![CalculatedLineItem {
                identifier: "SW10001".to_string(),
                quantity: 2,
                total_price: Decimal::new(3998, 2),
            }],
            price: CartPrice {
                goods_price: Decimal::new(3998, 2),
                total_price: Decimal::new(4388, 2),
                ..CartPrice::default()
            },
        }
    }

    #[test]
    fn test_goods_price_bounds() {
        let cart = cart();
        let ctx = context(None);
        let scope = RuleScope::at_date(&cart, &ctx, date(2024, 1, 1));

        let cheap_enough = Rule::GoodsPrice {
            min: None,
            max: Some(Decimal::new(40, 0)),
        };
        assert!(cheap_enough.evaluate(&scope).matched);

        let minimum = Rule::GoodsPrice {
            min: Some(Decimal::new(50, 0)),
            max: None,
        };
        assert_eq!(
            minimum.evaluate(&scope),
            Match::failed("Goods price 39.98 is out of range")
        );
    }

    #[test]
    fn test_line_items_in_cart() {
        let cart = cart();
        let ctx = context(None);
        let scope = RuleScope::at_date(&cart, &ctx, date(2024, 1, 1));

        let present = Rule::LineItemsInCart {
            identifiers: vec!["SW99999".to_string(), "SW10001".to_string()],
        };
        assert!(present.evaluate(&scope).matched);

        let absent = Rule::LineItemsInCart {
            identifiers: vec!["SW99999".to_string()],
        };
        assert!(!absent.evaluate(&scope).matched);
    }
}
