//! Cart rule evaluation.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use emporium_core::rule::RuleScope;
use emporium_core::{CalculatedCart, CustomerId, Match, Rule, ShopId};

use crate::error::Result;
use crate::services::ContextService;
use crate::state::AppState;

/// Build the rules router.
pub fn router() -> Router<AppState> {
    Router::new().route("/shops/{shop_id}/rules/evaluate", post(evaluate))
}

/// Rule to evaluate and the cart to evaluate it against.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Logged-in customer, if any.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub rule: Rule,
    #[serde(default)]
    pub cart: CalculatedCart,
    #[serde(default)]
    pub language: Option<Uuid>,
}

/// Evaluate a rule for a shop, customer and cart.
///
/// # Errors
///
/// Returns 404 for an unknown shop or customer.
#[instrument(skip(state, body), fields(rule = body.rule.kind()))]
pub async fn evaluate(
    State(state): State<AppState>,
    Path(shop_id): Path<ShopId>,
    Json(body): Json<EvaluateRequest>,
) -> Result<Json<Match>> {
    let context = ContextService::new(state.pool(), state.config().default_language)
        .shop_context(shop_id, body.customer_id, body.language)
        .await?;

    let outcome = body.rule.evaluate(&RuleScope::new(&body.cart, &context));
    debug!(matched = outcome.matched, "Evaluated rule");
    Ok(Json(outcome))
}
