//! Cart rules.
//!
//! A [`Rule`] is a predicate over a calculated cart and the shop context. Rules
//! gate discounts, shipping methods and other cart-level behaviour. Evaluation
//! is pure and returns a [`Match`]: the boolean outcome plus the reasons why
//! the rule did not apply, for display in diagnostics and the admin UI.
//!
//! Rules are stored as JSON and compose into boolean trees:
//!
//! ```rust
//! use emporium_core::Rule;
//!
//! let rule: Rule = serde_json::from_str(r#"{
//!     "type": "and",
//!     "rules": [
//!         {"type": "is_new_customer"},
//!         {"type": "goods_price", "min": "50.00"}
//!     ]
//! }"#).unwrap();
//! assert_eq!(rule.kind(), "and");
//! ```

mod cart;
mod customer;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CalculatedCart;
use crate::context::ShopContext;

pub use customer::{CUSTOMER_NOT_NEW, NOT_LOGGED_IN};

/// Reason reported by [`Rule::Not`] when its inner rule matched.
pub const NEGATED_RULE_MATCHED: &str = "Negated rule matched";

/// Outcome of evaluating a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub matched: bool,
    /// Reasons reported by the predicate, in evaluation order. A predicate may
    /// report its reason on both outcomes; combinators only collect the
    /// reasons of children that failed.
    pub reasons: Vec<String>,
}

impl Match {
    #[must_use]
    pub const fn new(matched: bool, reasons: Vec<String>) -> Self {
        Self { matched, reasons }
    }

    #[must_use]
    pub const fn matched() -> Self {
        Self {
            matched: true,
            reasons: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            matched: false,
            reasons: vec![reason.into()],
        }
    }

    /// A match if `condition` holds, otherwise a failure with `reason`.
    #[must_use]
    pub fn when(condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            Self::matched()
        } else {
            Self::failed(reason)
        }
    }
}

/// Inputs a rule is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct RuleScope<'a> {
    pub cart: &'a CalculatedCart,
    pub context: &'a ShopContext,
    /// Calendar date rules treat as "today".
    pub today: NaiveDate,
}

impl<'a> RuleScope<'a> {
    /// Scope dated with the evaluating process's local calendar date.
    ///
    /// The shop's and customer's configured timezones are not consulted.
    #[must_use]
    pub fn new(cart: &'a CalculatedCart, context: &'a ShopContext) -> Self {
        Self::at_date(cart, context, Local::now().date_naive())
    }

    /// Scope pinned to a specific date.
    #[must_use]
    pub const fn at_date(
        cart: &'a CalculatedCart,
        context: &'a ShopContext,
        today: NaiveDate,
    ) -> Self {
        Self {
            cart,
            context,
            today,
        }
    }
}

/// A cart rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Customer's first login happened today.
    IsNewCustomer,
    /// Customer belongs to one of the listed groups.
    CustomerGroup { customer_group_uuids: Vec<Uuid> },
    /// Cart goods price lies within the inclusive bounds.
    GoodsPrice {
        #[serde(default)]
        min: Option<Decimal>,
        #[serde(default)]
        max: Option<Decimal>,
    },
    /// At least one of the identifiers is in the cart.
    LineItemsInCart { identifiers: Vec<String> },
    /// Every child matches. An empty list matches.
    And { rules: Vec<Rule> },
    /// Some child matches. An empty list does not match.
    Or { rules: Vec<Rule> },
    /// The child does not match.
    Not { rule: Box<Rule> },
}

impl Rule {
    /// Stable name of the rule type, as used in the JSON `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IsNewCustomer => "is_new_customer",
            Self::CustomerGroup { .. } => "customer_group",
            Self::GoodsPrice { .. } => "goods_price",
            Self::LineItemsInCart { .. } => "line_items_in_cart",
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
            Self::Not { .. } => "not",
        }
    }

    /// Evaluate the rule.
    #[must_use]
    pub fn evaluate(&self, scope: &RuleScope<'_>) -> Match {
        match self {
            Self::IsNewCustomer => customer::is_new_customer(scope),
            Self::CustomerGroup {
                customer_group_uuids,
            } => customer::in_customer_group(scope, customer_group_uuids),
            Self::GoodsPrice { min, max } => cart::goods_price_within(scope, *min, *max),
            Self::LineItemsInCart { identifiers } => cart::any_line_item(scope, identifiers),
            Self::And { rules } => all(rules, scope),
            Self::Or { rules } => any(rules, scope),
            Self::Not { rule } => {
                let inner = rule.evaluate(scope);
                Match::when(!inner.matched, NEGATED_RULE_MATCHED)
            }
        }
    }
}

// Children are all evaluated so the caller sees every failing reason.
fn all(rules: &[Rule], scope: &RuleScope<'_>) -> Match {
    let mut result = Match::matched();
    for rule in rules {
        let child = rule.evaluate(scope);
        if !child.matched {
            result.matched = false;
            result.reasons.extend(child.reasons);
        }
    }
    result
}

fn any(rules: &[Rule], scope: &RuleScope<'_>) -> Match {
    let mut reasons = Vec::new();
    for rule in rules {
        let child = rule.evaluate(scope);
        if child.matched {
            return Match::matched();
        }
        reasons.extend(child.reasons);
    }
    Match::new(false, reasons)
}
