//! Benchmark data providers.
//!
//! A benchmark provider contributes one named section of shop statistics to
//! the benchmark report. Providers are created per request: any per-shop
//! memoization they do lives only as long as the provider instance.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut collector = BenchmarkCollector::new()
//!     .with_provider(ShipmentsProvider::new(PgShipmentSource::new(pool.clone())));
//! let report = collector.collect(&shop_context).await?;
//! // {"shipments": {"list": {...}, "usages": [...]}}
//! ```

pub mod shipments;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument};

use emporium_core::ShopContext;

use crate::db::RepositoryError;

pub use shipments::{ShipmentCosts, ShipmentSource, ShipmentUsage, ShipmentsProvider};

/// Errors produced while gathering benchmark data.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A named section of benchmark data.
#[async_trait]
pub trait BenchmarkProvider: Send {
    /// Section name in the report.
    fn name(&self) -> &'static str;

    /// Gather this provider's data for the shop in `context`.
    async fn benchmark_data(&mut self, context: &ShopContext) -> Result<Value, BenchmarkError>;
}

/// Runs a set of providers and assembles their sections into one report.
#[derive(Default)]
pub struct BenchmarkCollector {
    providers: Vec<Box<dyn BenchmarkProvider>>,
}

impl BenchmarkCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl BenchmarkProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Collect every provider's section, keyed by provider name.
    ///
    /// # Errors
    ///
    /// Returns the first provider error; later providers are not run.
    #[instrument(skip_all, fields(shop_id = %context.shop.id))]
    pub async fn collect(
        &mut self,
        context: &ShopContext,
    ) -> Result<Map<String, Value>, BenchmarkError> {
        let mut report = Map::new();
        for provider in &mut self.providers {
            let data = provider.benchmark_data(context).await?;
            debug!(provider = provider.name(), "Collected benchmark section");
            report.insert(provider.name().to_string(), data);
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use emporium_core::{Category, CategoryId, CategoryPath, Shop, ShopId, TranslationContext};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    struct StaticProvider(&'static str, Value);

    #[async_trait]
    impl BenchmarkProvider for StaticProvider {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn benchmark_data(
            &mut self,
            _context: &ShopContext,
        ) -> Result<Value, BenchmarkError> {
            Ok(self.1.clone())
        }
    }

    pub(crate) fn shop_context(shop_id: i32, root: i32) -> ShopContext {
        ShopContext::new(
            Shop {
                id: ShopId::new(shop_id),
                name: format!("Shop {shop_id}"),
                category: Category {
                    id: CategoryId::new(root),
                    path: CategoryPath::new("|1|"),
                },
            },
            None,
            TranslationContext::default_language(Uuid::from_u128(1)),
        )
    }

    #[tokio::test]
    async fn test_collector_keys_sections_by_provider_name() {
        let mut collector = BenchmarkCollector::new()
            .with_provider(StaticProvider("orders", json!({"count": 3})))
            .with_provider(StaticProvider("customers", json!({"count": 7})));

        let report = collector.collect(&shop_context(1, 3)).await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report["orders"], json!({"count": 3}));
        assert_eq!(report["customers"], json!({"count": 7}));
    }
}
