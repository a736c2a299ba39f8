//! Dispatch queries backing the shipments benchmark.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use emporium_core::{CategoryId, CategoryPath, DispatchId};

use super::RepositoryError;
use crate::benchmark::{ShipmentCosts, ShipmentSource, ShipmentUsage};

#[derive(Debug, sqlx::FromRow)]
struct ShipmentCostsRow {
    name: String,
    min_price: Decimal,
    max_price: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct ShipmentUsageRow {
    name: String,
    usages: i64,
}

/// [`ShipmentSource`] backed by the `shop` schema.
#[derive(Clone)]
pub struct PgShipmentSource {
    pool: PgPool,
}

impl PgShipmentSource {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShipmentSource for PgShipmentSource {
    async fn dispatch_ids(&self) -> Result<Vec<DispatchId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, DispatchId>("SELECT id FROM shop.dispatch ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn forbidden_categories(
        &self,
    ) -> Result<Vec<(DispatchId, CategoryId)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (DispatchId, CategoryId)>(
            "SELECT dispatch_id, category_id FROM shop.dispatch_category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn reachable_category_ids(
        &self,
        root: CategoryId,
    ) -> Result<Vec<CategoryId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, CategoryId>(
            r"
            SELECT id
            FROM shop.category
            WHERE path LIKE $1 OR id = $2
            ",
        )
        .bind(CategoryPath::like_pattern(root))
        .bind(root)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn shipping_costs(
        &self,
        dispatch_ids: &[DispatchId],
    ) -> Result<Vec<(String, ShipmentCosts)>, RepositoryError> {
        if dispatch_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ShipmentCostsRow>(
            r"
            SELECT d.name, MIN(c.value) AS min_price, MAX(c.value) AS max_price
            FROM shop.dispatch d
            INNER JOIN shop.dispatch_cost c ON c.dispatch_id = d.id
            WHERE d.id = ANY($1)
            GROUP BY d.id, d.name
            ORDER BY d.id
            ",
        )
        .bind(dispatch_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.name,
                    ShipmentCosts {
                        min_price: row.min_price,
                        max_price: row.max_price,
                    },
                )
            })
            .collect())
    }

    async fn usages(
        &self,
        dispatch_ids: &[DispatchId],
    ) -> Result<Vec<ShipmentUsage>, RepositoryError> {
        if dispatch_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ShipmentUsageRow>(
            r"
            SELECT d.name, COUNT(o.id) AS usages
            FROM shop.sales_order o
            INNER JOIN shop.dispatch d ON d.id = o.dispatch_id
            WHERE d.id = ANY($1)
            GROUP BY d.id, d.name
            ORDER BY d.id
            ",
        )
        .bind(dispatch_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ShipmentUsage {
                name: row.name,
                usages: row.usages,
            })
            .collect())
    }
}
