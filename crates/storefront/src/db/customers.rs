//! Customer repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use emporium_core::{Customer, CustomerId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    email: String,
    first_name: String,
    last_name: String,
    first_login: NaiveDate,
    customer_group_uuid: Uuid,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            first_login: row.first_login,
            customer_group_uuid: row.customer_group_uuid,
        }
    }
}

/// Repository for customer lookups.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, email, first_name, last_name, first_login, customer_group_uuid
            FROM shop.customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }
}
