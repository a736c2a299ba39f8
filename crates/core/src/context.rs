//! Request-scoped shop context.
//!
//! A [`ShopContext`] bundles what a storefront request knows about where it is
//! running: the active shop and its root category, the logged-in customer (if
//! any), and which language variant of translatable fields to hydrate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CategoryId, CustomerId, ShopId};

/// Materialized category path such as `|1|5|12|`.
///
/// Every id on the path is wrapped in pipes, so matching `|id|` never hits a
/// prefix of a longer id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPath(String);

impl CategoryPath {
    /// Wrap a raw path string as stored in the `category.path` column.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build a path from ids, in stored order.
    #[must_use]
    pub fn from_ids(ids: &[CategoryId]) -> Self {
        if ids.is_empty() {
            return Self::default();
        }
        let inner = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");
        Self(format!("|{inner}|"))
    }

    /// The raw path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL `LIKE` pattern matching every path that contains `id`.
    #[must_use]
    pub fn like_pattern(id: CategoryId) -> String {
        format!("%|{id}|%")
    }

    /// Ids on the path. Segments that are not integers are skipped.
    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.0
            .split('|')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| segment.parse().ok())
    }
}

/// A category node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub path: CategoryPath,
}

/// A storefront (sub)shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    /// Root category of the shop's catalogue.
    pub category: Category,
}

/// A logged-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Calendar date of the customer's first login, as stored.
    pub first_login: NaiveDate,
    pub customer_group_uuid: Uuid,
}

/// Which language variant of translatable fields to hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationContext {
    pub language_uuid: Uuid,
    /// Language used when no translation exists for `language_uuid`.
    pub fallback_language_uuid: Option<Uuid>,
    pub is_default_language: bool,
}

impl TranslationContext {
    /// Context for the shop's default language (no fallback needed).
    #[must_use]
    pub const fn default_language(language_uuid: Uuid) -> Self {
        Self {
            language_uuid,
            fallback_language_uuid: None,
            is_default_language: true,
        }
    }

    /// Context for a secondary language falling back to `fallback`.
    #[must_use]
    pub const fn with_fallback(language_uuid: Uuid, fallback: Uuid) -> Self {
        Self {
            language_uuid,
            fallback_language_uuid: Some(fallback),
            is_default_language: false,
        }
    }

    /// Pick the translated value, else the fallback-language value.
    #[must_use]
    pub fn resolve(&self, translated: Option<String>, fallback: Option<String>) -> Option<String> {
        translated.or(if self.is_default_language {
            None
        } else {
            fallback
        })
    }
}

/// Everything a request knows about the shop it runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopContext {
    pub shop: Shop,
    pub customer: Option<Customer>,
    pub translation: TranslationContext,
}

impl ShopContext {
    #[must_use]
    pub const fn new(
        shop: Shop,
        customer: Option<Customer>,
        translation: TranslationContext,
    ) -> Self {
        Self {
            shop,
            customer,
            translation,
        }
    }

    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }
}
