//! Integration tests for Emporium.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a scratch database (migrations are applied)
//! export TEST_DATABASE_URL=postgres://localhost/emporium_test
//!
//! # API tests additionally need a running storefront
//! cargo run -p emporium-storefront
//!
//! cargo test -p emporium-integration-tests -- --ignored
//! ```
//!
//! Fixtures use fresh uuids and unique names, so tests can share one database
//! and run in parallel. Nothing is cleaned up afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use emporium_core::{CategoryId, CategoryPath, CustomerId, DispatchId, ShopId};
use emporium_storefront::config::DEFAULT_LANGUAGE_UUID;
use emporium_storefront::db;

/// Base URL of a running storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Connection to a migrated test database.
pub struct TestContext {
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to `TEST_DATABASE_URL` (or `EMPORIUM_DATABASE_URL`) and migrate.
    ///
    /// # Panics
    ///
    /// Panics if no database is configured or reachable.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("EMPORIUM_DATABASE_URL"))
            .expect("TEST_DATABASE_URL not set");

        let pool = db::create_pool(&SecretString::from(url))
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("../storefront/migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool }
    }

    /// Insert a language and return its uuid.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn language(&self, name: &str) -> Result<Uuid, sqlx::Error> {
        let uuid = Uuid::new_v4();
        sqlx::query("INSERT INTO shop.language (uuid, locale, name) VALUES ($1, $2, $3)")
            .bind(uuid)
            .bind(format!("x-{}", uuid.simple()))
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(uuid)
    }

    /// Insert a category below `parent` (or a root) and return its id.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn category(
        &self,
        name: &str,
        parent: Option<(CategoryId, &CategoryPath)>,
    ) -> Result<(CategoryId, CategoryPath), sqlx::Error> {
        let path = parent.map_or_else(
            || CategoryPath::new(""),
            |(id, path)| {
                let mut ids = vec![id];
                ids.extend(path.ids());
                CategoryPath::from_ids(&ids)
            },
        );
        let id = sqlx::query_scalar::<_, CategoryId>(
            "INSERT INTO shop.category (parent_id, path, name) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(parent.map(|(id, _)| id))
        .bind(path.as_str())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok((id, path))
    }

    /// Insert a shop rooted at `category`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn shop(&self, name: &str, category: CategoryId) -> Result<ShopId, sqlx::Error> {
        sqlx::query_scalar::<_, ShopId>(
            "INSERT INTO shop.shop (name, category_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(category)
        .fetch_one(&self.pool)
        .await
    }

    /// Insert a dispatch with one cost tier per entry of `costs`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if an insert fails.
    pub async fn dispatch(&self, name: &str, costs: &[Decimal]) -> Result<DispatchId, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DispatchId>(
            "INSERT INTO shop.dispatch (name) VALUES ($1) RETURNING id",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        for cost in costs {
            sqlx::query("INSERT INTO shop.dispatch_cost (dispatch_id, value) VALUES ($1, $2)")
                .bind(id)
                .bind(cost)
                .execute(&self.pool)
                .await?;
        }
        Ok(id)
    }

    /// Forbid `dispatch` from shipping `category`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn forbid(
        &self,
        dispatch: DispatchId,
        category: CategoryId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO shop.dispatch_category (dispatch_id, category_id) VALUES ($1, $2)",
        )
        .bind(dispatch)
        .bind(category)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Record an order shipped with `dispatch`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn order(&self, dispatch: DispatchId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO shop.sales_order (dispatch_id) VALUES ($1)")
            .bind(dispatch)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a customer group, optionally named in the default language.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if an insert fails.
    pub async fn customer_group(&self, name: Option<&str>) -> Result<Uuid, sqlx::Error> {
        let uuid = Uuid::new_v4();
        sqlx::query("INSERT INTO shop.customer_group (uuid, group_key) VALUES ($1, $2)")
            .bind(uuid)
            .bind(uuid.simple().to_string())
            .execute(&self.pool)
            .await?;

        if let Some(name) = name {
            sqlx::query(
                r"
                INSERT INTO shop.customer_group_translation
                    (customer_group_uuid, language_uuid, name)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(uuid)
            .bind(DEFAULT_LANGUAGE_UUID)
            .bind(name)
            .execute(&self.pool)
            .await?;
        }
        Ok(uuid)
    }

    /// Insert a customer in `group` who first logged in on `first_login`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn customer(
        &self,
        group: Uuid,
        first_login: NaiveDate,
    ) -> Result<CustomerId, sqlx::Error> {
        sqlx::query_scalar::<_, CustomerId>(
            r"
            INSERT INTO shop.customer
                (email, first_name, last_name, first_login, customer_group_uuid)
            VALUES ($1, 'Test', 'Customer', $2, $3)
            RETURNING id
            ",
        )
        .bind(format!("{}@example.com", Uuid::new_v4().simple()))
        .bind(first_login)
        .bind(group)
        .fetch_one(&self.pool)
        .await
    }

    /// Insert a country state.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the insert fails.
    pub async fn country_state(&self) -> Result<Uuid, sqlx::Error> {
        let uuid = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO shop.area_country_state (uuid, country_iso, short_code)
            VALUES ($1, 'XX', $2)
            ",
        )
        .bind(uuid)
        .bind(uuid.simple().to_string())
        .execute(&self.pool)
        .await?;
        Ok(uuid)
    }
}
