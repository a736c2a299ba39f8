//! Shop repository.

use sqlx::PgPool;

use emporium_core::{Category, CategoryId, CategoryPath, Shop, ShopId};

use super::RepositoryError;

/// Internal row type for shop queries (joined with the root category).
#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: ShopId,
    name: String,
    category_id: CategoryId,
    category_path: String,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: Category {
                id: row.category_id,
                path: CategoryPath::new(row.category_path),
            },
        }
    }
}

/// Repository for shop lookups.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a shop with its root category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(
            r"
            SELECT s.id, s.name, c.id AS category_id, c.path AS category_path
            FROM shop.shop s
            JOIN shop.category c ON c.id = s.category_id
            WHERE s.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Shop::from))
    }
}
