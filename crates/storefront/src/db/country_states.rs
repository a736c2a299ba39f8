//! Country state translation writes.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use emporium_core::events::AreaCountryStateTranslationWrittenEvent;

use super::{RepositoryError, map_write_error};
use crate::events::EventBus;
use crate::models::AreaCountryStateTranslation;

/// Write access to country state translations.
pub struct AreaCountryStateRepository<'a> {
    pool: &'a PgPool,
    events: &'a EventBus,
}

impl<'a> AreaCountryStateRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, events: &'a EventBus) -> Self {
        Self { pool, events }
    }

    /// Insert or replace a state's name in one language.
    ///
    /// Publishes `area_country_state_translation.written` on success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the state or language does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, translation), fields(state = %translation.area_country_state_uuid))]
    pub async fn upsert_translation(
        &self,
        translation: &AreaCountryStateTranslation,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.area_country_state_translation
                (area_country_state_uuid, language_uuid, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (area_country_state_uuid, language_uuid) DO UPDATE SET name = EXCLUDED.name
            ",
        )
        .bind(translation.area_country_state_uuid)
        .bind(translation.language_uuid)
        .bind(&translation.name)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "country state translation"))?;

        self.events
            .publish(&AreaCountryStateTranslationWrittenEvent::new(vec![
                translation.area_country_state_uuid,
            ]));
        Ok(())
    }

    /// Get all translations of a state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn translations(
        &self,
        area_country_state_uuid: Uuid,
    ) -> Result<Vec<AreaCountryStateTranslation>, RepositoryError> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid, String)>(
            r"
            SELECT area_country_state_uuid, language_uuid, name
            FROM shop.area_country_state_translation
            WHERE area_country_state_uuid = $1
            ORDER BY language_uuid
            ",
        )
        .bind(area_country_state_uuid)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(area_country_state_uuid, language_uuid, name)| AreaCountryStateTranslation {
                    area_country_state_uuid,
                    language_uuid,
                    name,
                },
            )
            .collect())
    }
}
