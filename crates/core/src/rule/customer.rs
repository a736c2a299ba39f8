//! Customer-state predicates.

use uuid::Uuid;

use super::{Match, RuleScope};

/// Reason reported by customer rules when nobody is logged in.
pub const NOT_LOGGED_IN: &str = "Not logged in customer";
/// Reason reported when the customer's first login was not today.
pub const CUSTOMER_NOT_NEW: &str = "Customer is not new";

/// "New" means first login on the scope's calendar day, not a rolling window.
///
/// The reason is reported whether or not the customer is new.
pub(super) fn is_new_customer(scope: &RuleScope<'_>) -> Match {
    let Some(customer) = scope.context.customer() else {
        return Match::failed(NOT_LOGGED_IN);
    };

    Match::new(
        customer.first_login == scope.today,
        vec![CUSTOMER_NOT_NEW.to_string()],
    )
}

pub(super) fn in_customer_group(scope: &RuleScope<'_>, groups: &[Uuid]) -> Match {
    let Some(customer) = scope.context.customer() else {
        return Match::failed(NOT_LOGGED_IN);
    };

    Match::when(
        groups.contains(&customer.customer_group_uuid),
        format!(
            "Customer group {} is not allowed",
            customer.customer_group_uuid
        ),
    )
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::super::Rule;
    use super::super::test_support::{context, customer, date};
    use super::*;
    use crate::cart::CalculatedCart;

    #[test]
    fn test_new_customer_first_login_today() {
        let today = date(2024, 3, 10);
        let ctx = context(Some(customer(today, Uuid::from_u128(1))));
        let cart = CalculatedCart::default();
        let scope = RuleScope::at_date(&cart, &ctx, today);

        let result = Rule::IsNewCustomer.evaluate(&scope);
        assert!(result.matched);
        assert_eq!(result.reasons, vec![CUSTOMER_NOT_NEW.to_string()]);
    }

    #[test]
    fn test_customer_from_yesterday_is_not_new() {
        let today = date(2024, 3, 10);
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let ctx = context(Some(customer(yesterday, Uuid::from_u128(1))));
        let cart = CalculatedCart::default();
        let scope = RuleScope::at_date(&cart, &ctx, today);

        assert_eq!(
            Rule::IsNewCustomer.evaluate(&scope),
            Match::failed(CUSTOMER_NOT_NEW)
        );
    }

    #[test]
    fn test_anonymous_visitor_fails_closed() {
        let ctx = context(None);
        let cart = CalculatedCart::default();
        let scope = RuleScope::at_date(&cart, &ctx, date(2024, 3, 10));

        assert_eq!(
            Rule::IsNewCustomer.evaluate(&scope),
            Match::failed(NOT_LOGGED_IN)
        );
        let group = Rule::CustomerGroup {
            customer_group_uuids: vec![Uuid::from_u128(1)],
        };
        assert_eq!(group.evaluate(&scope), Match::failed(NOT_LOGGED_IN));
    }

    #[test]
    fn test_customer_group_membership() {
        let dealers = Uuid::from_u128(7);
        let ctx = context(Some(customer(date(2020, 1, 1), dealers)));
        let cart = CalculatedCart::default();
        let scope = RuleScope::at_date(&cart, &ctx, date(2024, 3, 10));

        let allowed = Rule::CustomerGroup {
            customer_group_uuids: vec![Uuid::from_u128(1), dealers],
        };
        assert!(allowed.evaluate(&scope).matched);

        let denied = Rule::CustomerGroup {
            customer_group_uuids: vec![Uuid::from_u128(1)],
        };
        let result = denied.evaluate(&scope);
        assert!(!result.matched);
        assert_eq!(
            result.reasons,
            vec![format!("Customer group {dealers} is not allowed")]
        );
    }
}
