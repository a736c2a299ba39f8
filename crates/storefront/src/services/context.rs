//! Shop context resolution.
//!
//! Every storefront operation runs against a [`ShopContext`]: the shop, the
//! customer (if one is logged in) and the language translatable fields are
//! hydrated in.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use emporium_core::{CustomerId, ShopContext, ShopId, TranslationContext};

use crate::db::{CustomerRepository, RepositoryError, ShopRepository};

/// Errors that can occur while resolving a shop context.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("shop {0} not found")]
    ShopNotFound(ShopId),

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Translation context for `requested`, falling back to `default_language`.
///
/// No language, or the default language itself, yields a context without
/// fallback.
#[must_use]
pub fn translation_context(requested: Option<Uuid>, default_language: Uuid) -> TranslationContext {
    match requested {
        Some(language) if language != default_language => {
            TranslationContext::with_fallback(language, default_language)
        }
        _ => TranslationContext::default_language(default_language),
    }
}

/// Builds [`ShopContext`]s from the database.
pub struct ContextService<'a> {
    shops: ShopRepository<'a>,
    customers: CustomerRepository<'a>,
    default_language: Uuid,
}

impl<'a> ContextService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, default_language: Uuid) -> Self {
        Self {
            shops: ShopRepository::new(pool),
            customers: CustomerRepository::new(pool),
            default_language,
        }
    }

    /// Resolve the context for a request.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::ShopNotFound` or `ContextError::CustomerNotFound`
    /// for unknown ids, `ContextError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn shop_context(
        &self,
        shop_id: ShopId,
        customer_id: Option<CustomerId>,
        language: Option<Uuid>,
    ) -> Result<ShopContext, ContextError> {
        let shop = self
            .shops
            .get_by_id(shop_id)
            .await?
            .ok_or(ContextError::ShopNotFound(shop_id))?;

        let customer = match customer_id {
            Some(id) => Some(
                self.customers
                    .get_by_id(id)
                    .await?
                    .ok_or(ContextError::CustomerNotFound(id))?,
            ),
            None => None,
        };

        Ok(ShopContext::new(
            shop,
            customer,
            translation_context(language, self.default_language),
        ))
    }
}
