//! Customer group API handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::{CustomerGroupLoader, CustomerGroupRepository};
use crate::error::{AppError, Result};
use crate::models::CustomerGroup;
use crate::services::translation_context;
use crate::state::AppState;

/// Build the customer groups router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customer-groups", get(list))
        .route(
            "/customer-groups/{uuid}/translations/{language}",
            put(put_translation),
        )
}

/// Query for the bulk loader.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Comma separated group uuids; the response keeps this order.
    #[serde(default)]
    pub uuids: String,
    pub language: Option<Uuid>,
}

/// Body of a translation write.
#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub name: String,
}

/// Parse a comma separated uuid list. Blank entries are ignored.
///
/// # Errors
///
/// Returns `AppError::BadRequest` naming the first invalid entry.
pub fn parse_uuid_list(raw: &str) -> Result<Vec<Uuid>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part).map_err(|_| AppError::BadRequest(format!("invalid uuid: {part}")))
        })
        .collect()
}

/// Load customer groups in the requested order.
///
/// # Errors
///
/// Returns 400 for malformed uuids, 500 if the query fails.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CustomerGroup>>> {
    let uuids = parse_uuid_list(&query.uuids)?;
    let context = translation_context(query.language, state.config().default_language);

    let groups = CustomerGroupLoader::new(state.pool())
        .load(&uuids, &context)
        .await?;
    Ok(Json(groups))
}

/// Write a customer group name in one language.
///
/// # Errors
///
/// Returns 400 for an empty name, 409 if the group or language does not exist.
#[instrument(skip(state, body))]
pub async fn put_translation(
    State(state): State<AppState>,
    Path((uuid, language)): Path<(Uuid, Uuid)>,
    Json(body): Json<TranslationRequest>,
) -> Result<StatusCode> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    CustomerGroupRepository::new(state.pool(), state.events())
        .upsert_translation(uuid, language, name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_list_keeps_order() {
        let a = Uuid::from_u128(0xa);
        let b = Uuid::from_u128(0xb);
        let raw = format!("{b}, {a},,{b}");

        assert_eq!(parse_uuid_list(&raw).unwrap(), vec![b, a, b]);
    }

    #[test]
    fn test_parse_uuid_list_empty() {
        assert!(parse_uuid_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_uuid_list_rejects_garbage() {
        let err = parse_uuid_list("not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("not-a-uuid")));
    }
}
