//! Customer group loading and translation writes.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use emporium_core::TranslationContext;
use emporium_core::events::{CustomerGroupTranslationWrittenEvent, CustomerGroupWrittenEvent};
use emporium_core::sort::sort_by_requested_keys;

use super::{RepositoryError, map_write_error};
use crate::events::EventBus;
use crate::models::CustomerGroup;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Customer group row joined with the requested and fallback translations.
#[derive(Debug, sqlx::FromRow)]
struct CustomerGroupRow {
    uuid: Uuid,
    group_key: String,
    display_gross: bool,
    input_gross: bool,
    has_global_discount: bool,
    percentage_global_discount: Decimal,
    minimum_order_amount: Decimal,
    minimum_order_amount_surcharge: Decimal,
    translated_name: Option<String>,
    fallback_name: Option<String>,
}

impl CustomerGroupRow {
    fn hydrate(self, context: &TranslationContext) -> Result<CustomerGroup, RepositoryError> {
        if self.percentage_global_discount < Decimal::ZERO
            || self.percentage_global_discount > Decimal::ONE_HUNDRED
        {
            return Err(RepositoryError::DataCorruption(format!(
                "customer group {} has discount {}%",
                self.uuid, self.percentage_global_discount
            )));
        }

        Ok(CustomerGroup {
            uuid: self.uuid,
            group_key: self.group_key,
            name: context.resolve(self.translated_name, self.fallback_name),
            display_gross: self.display_gross,
            input_gross: self.input_gross,
            has_global_discount: self.has_global_discount,
            percentage_global_discount: self.percentage_global_discount,
            minimum_order_amount: self.minimum_order_amount,
            minimum_order_amount_surcharge: self.minimum_order_amount_surcharge,
        })
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Bulk loader for customer groups.
pub struct CustomerGroupLoader<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerGroupLoader<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load customer groups by uuid, in the order of `uuids`.
    ///
    /// Unknown uuids are skipped; a uuid requested twice appears once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row fails validation.
    #[instrument(
        skip(self, context),
        fields(count = uuids.len(), language = %context.language_uuid)
    )]
    pub async fn load(
        &self,
        uuids: &[Uuid],
        context: &TranslationContext,
    ) -> Result<Vec<CustomerGroup>, RepositoryError> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CustomerGroupRow>(
            r"
            SELECT
                g.uuid,
                g.group_key,
                g.display_gross,
                g.input_gross,
                g.has_global_discount,
                g.percentage_global_discount,
                g.minimum_order_amount,
                g.minimum_order_amount_surcharge,
                t.name AS translated_name,
                f.name AS fallback_name
            FROM shop.customer_group g
            LEFT JOIN shop.customer_group_translation t
                ON t.customer_group_uuid = g.uuid AND t.language_uuid = $2
            LEFT JOIN shop.customer_group_translation f
                ON f.customer_group_uuid = g.uuid AND f.language_uuid = $3
            WHERE g.uuid = ANY($1)
            ",
        )
        .bind(uuids)
        .bind(context.language_uuid)
        .bind(context.fallback_language_uuid)
        .fetch_all(self.pool)
        .await?;

        let groups = rows
            .into_iter()
            .map(|row| row.hydrate(context))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sort_by_requested_keys(uuids, groups, |group| &group.uuid))
    }
}

// =============================================================================
// Repository (writes)
// =============================================================================

/// Write access to customer group translations.
pub struct CustomerGroupRepository<'a> {
    pool: &'a PgPool,
    events: &'a EventBus,
}

impl<'a> CustomerGroupRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, events: &'a EventBus) -> Self {
        Self { pool, events }
    }

    /// Insert or replace a group's name in one language.
    ///
    /// Publishes `customer_group_translation.written`, then
    /// `customer_group.written` for the owning group, on success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the group or language does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, name))]
    pub async fn upsert_translation(
        &self,
        customer_group_uuid: Uuid,
        language_uuid: Uuid,
        name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.customer_group_translation (customer_group_uuid, language_uuid, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_group_uuid, language_uuid) DO UPDATE SET name = EXCLUDED.name
            ",
        )
        .bind(customer_group_uuid)
        .bind(language_uuid)
        .bind(name)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "customer group translation"))?;

        self.events
            .publish(&CustomerGroupTranslationWrittenEvent::new(vec![
                customer_group_uuid,
            ]));
        self.events
            .publish(&CustomerGroupWrittenEvent::new(vec![customer_group_uuid]));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(translated: Option<&str>, fallback: Option<&str>) -> CustomerGroupRow {
        CustomerGroupRow {
            uuid: Uuid::from_u128(1),
            group_key: "H".to_string(),
            display_gross: false,
            input_gross: false,
            has_global_discount: true,
            percentage_global_discount: Decimal::new(5, 0),
            minimum_order_amount: Decimal::new(10, 0),
            minimum_order_amount_surcharge: Decimal::new(5, 0),
            translated_name: translated.map(String::from),
            fallback_name: fallback.map(String::from),
        }
    }

    #[test]
    fn test_hydrate_prefers_requested_language() {
        let ctx = TranslationContext::with_fallback(Uuid::from_u128(2), Uuid::from_u128(1));
        let group = row(Some("Händler"), Some("Dealer")).hydrate(&ctx).unwrap();
        assert_eq!(group.name.as_deref(), Some("Händler"));
        assert_eq!(group.group_key, "H");
        assert!(group.has_global_discount);
    }

    #[test]
    fn test_hydrate_falls_back() {
        let ctx = TranslationContext::with_fallback(Uuid::from_u128(2), Uuid::from_u128(1));
        let group = row(None, Some("Dealer")).hydrate(&ctx).unwrap();
        assert_eq!(group.name.as_deref(), Some("Dealer"));
    }

    #[test]
    fn test_hydrate_rejects_impossible_discount() {
        let ctx = TranslationContext::default_language(Uuid::from_u128(1));
        let mut bad = row(Some("Dealer"), None);
        bad.percentage_global_discount = Decimal::new(150, 0);
        assert!(matches!(
            bad.hydrate(&ctx),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
