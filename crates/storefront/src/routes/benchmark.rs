//! Shop benchmark report.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;
use uuid::Uuid;

use emporium_core::ShopId;

use crate::benchmark::{BenchmarkCollector, ShipmentsProvider};
use crate::db::PgShipmentSource;
use crate::error::Result;
use crate::services::ContextService;
use crate::state::AppState;

/// Build the benchmark router.
pub fn router() -> Router<AppState> {
    Router::new().route("/shops/{shop_id}/benchmark", get(benchmark))
}

#[derive(Debug, Default, Deserialize)]
pub struct BenchmarkQuery {
    pub language: Option<Uuid>,
}

/// Collector with every benchmark provider, fresh for one request.
#[must_use]
pub fn collector(state: &AppState) -> BenchmarkCollector {
    BenchmarkCollector::new().with_provider(ShipmentsProvider::new(PgShipmentSource::new(
        state.pool().clone(),
    )))
}

/// Collect the benchmark report for a shop.
///
/// # Errors
///
/// Returns 404 for an unknown shop, 500 if a provider fails.
#[instrument(skip(state, query))]
pub async fn benchmark(
    State(state): State<AppState>,
    Path(shop_id): Path<ShopId>,
    Query(query): Query<BenchmarkQuery>,
) -> Result<Json<Map<String, Value>>> {
    let context = ContextService::new(state.pool(), state.config().default_language)
        .shop_context(shop_id, None, query.language)
        .await?;

    let report = collector(&state).collect(&context).await?;
    Ok(Json(report))
}
