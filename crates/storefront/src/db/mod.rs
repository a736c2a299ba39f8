//! Database operations for the storefront `PostgreSQL` database.
//!
//! # Schema: `shop`
//!
//! ## Tables
//!
//! - `language` - Content languages
//! - `category` - Category tree (materialized `path` column, e.g. `|1|5|`)
//! - `shop` - Storefronts and their root category
//! - `customer_group` / `customer_group_translation` - Translatable customer groups
//! - `customer` - Customers and their first-login date
//! - `dispatch` - Shipping methods
//! - `dispatch_cost` - Cost tiers per dispatch
//! - `dispatch_category` - Categories a dispatch may not ship
//! - `sales_order` - Orders (dispatch usage counts)
//! - `area_country_state` / `area_country_state_translation` - Country states
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p emporium-cli -- migrate
//! ```

pub mod country_states;
pub mod customer_groups;
pub mod customers;
pub mod shipments;
pub mod shops;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use country_states::AreaCountryStateRepository;
pub use customer_groups::{CustomerGroupLoader, CustomerGroupRepository};
pub use customers::CustomerRepository;
pub use shipments::PgShipmentSource;
pub use shops::ShopRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., translation for an unknown language).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map insert/update errors, surfacing foreign-key violations as conflicts.
pub(crate) fn map_write_error(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict(format!("{what} references a missing row"));
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
