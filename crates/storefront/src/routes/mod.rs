//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                          - Liveness check
//! GET  /health/ready                                    - Readiness check (database)
//!
//! # Benchmark
//! GET  /shops/{shop_id}/benchmark                       - Benchmark report
//!
//! # Rules
//! POST /shops/{shop_id}/rules/evaluate                  - Evaluate a cart rule
//!
//! # Customer groups
//! GET  /customer-groups?uuids=a,b&language=l            - Bulk load, requested order
//! PUT  /customer-groups/{uuid}/translations/{language}  - Write a group name
//!
//! # Country states
//! GET  /country-states/{uuid}/translations              - List state names
//! PUT  /country-states/{uuid}/translations/{language}   - Write a state name
//! ```

pub mod benchmark;
pub mod country_states;
pub mod customer_groups;
pub mod rules;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(benchmark::router())
        .merge(rules::router())
        .merge(customer_groups::router())
        .merge(country_states::router())
}

/// Full application: health checks, API routes and the HTTP layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
