//! Country state translation handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use tracing::instrument;
use uuid::Uuid;

use super::customer_groups::TranslationRequest;
use crate::db::AreaCountryStateRepository;
use crate::error::{AppError, Result};
use crate::models::AreaCountryStateTranslation;
use crate::state::AppState;

/// Build the country states router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/country-states/{uuid}/translations", get(translations))
        .route(
            "/country-states/{uuid}/translations/{language}",
            put(put_translation),
        )
}

/// List every translation of a state.
///
/// # Errors
///
/// Returns 500 if the query fails.
pub async fn translations(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<Vec<AreaCountryStateTranslation>>> {
    let translations = AreaCountryStateRepository::new(state.pool(), state.events())
        .translations(uuid)
        .await?;
    Ok(Json(translations))
}

/// Write a state name in one language.
///
/// # Errors
///
/// Returns 400 for an empty name, 409 if the state or language does not exist.
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

    let translation = AreaCountryStateTranslation {
        area_country_state_uuid: uuid,
        language_uuid: language,
        name: name.to_string(),
    };
    AreaCountryStateRepository::new(state.pool(), state.events())
        .upsert_translation(&translation)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
