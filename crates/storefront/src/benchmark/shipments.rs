//! Shipment benchmark: shipping methods available to a shop, their price
//! range and how often orders used them.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use emporium_core::shipping::{eligible_dispatch_ids, group_forbidden_categories};
use emporium_core::{CategoryId, DispatchId, Shop, ShopContext, ShopId};

use super::{BenchmarkError, BenchmarkProvider};
use crate::db::RepositoryError;

/// Price range of one dispatch across its cost tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentCosts {
    #[serde(with = "rust_decimal::serde::float")]
    pub min_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_price: Decimal,
}

/// Number of orders placed with a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentUsage {
    pub name: String,
    pub usages: i64,
}

/// Report section produced by [`ShipmentsProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentsBenchmark {
    /// Eligible dispatches with at least one cost tier, keyed by dispatch
    /// name. When two dispatches share a name the one with the higher id wins.
    pub list: BTreeMap<String, ShipmentCosts>,
    pub usages: Vec<ShipmentUsage>,
}

/// Data access needed by [`ShipmentsProvider`].
#[async_trait]
pub trait ShipmentSource: Send + Sync {
    /// Every configured dispatch.
    async fn dispatch_ids(&self) -> Result<Vec<DispatchId>, RepositoryError>;

    /// `(dispatch, category)` pairs a dispatch may not ship.
    async fn forbidden_categories(
        &self,
    ) -> Result<Vec<(DispatchId, CategoryId)>, RepositoryError>;

    /// The root category plus every category whose path contains it.
    async fn reachable_category_ids(
        &self,
        root: CategoryId,
    ) -> Result<Vec<CategoryId>, RepositoryError>;

    /// Min/max cost per dispatch name, for dispatches that have cost tiers.
    /// Rows come in dispatch id order.
    async fn shipping_costs(
        &self,
        dispatch_ids: &[DispatchId],
    ) -> Result<Vec<(String, ShipmentCosts)>, RepositoryError>;

    /// Order counts per dispatch, for dispatches that were used.
    async fn usages(
        &self,
        dispatch_ids: &[DispatchId],
    ) -> Result<Vec<ShipmentUsage>, RepositoryError>;
}

/// Benchmark provider for shipping methods.
///
/// The eligible dispatch ids are computed once per shop and kept for the
/// lifetime of the provider. There is no invalidation, so create one provider
/// per request.
pub struct ShipmentsProvider<S> {
    source: S,
    shipment_ids: HashMap<ShopId, Vec<DispatchId>>,
}

impl<S: ShipmentSource> ShipmentsProvider<S> {
    pub const NAME: &'static str = "shipments";

    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            shipment_ids: HashMap::new(),
        }
    }

    /// Dispatch ids usable in `shop`, memoized per shop id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any query fails. Failures are not cached.
    #[instrument(skip(self, shop), fields(shop_id = %shop.id))]
    pub async fn shipment_ids(&mut self, shop: &Shop) -> Result<Vec<DispatchId>, RepositoryError> {
        if let Some(ids) = self.shipment_ids.get(&shop.id) {
            return Ok(ids.clone());
        }

        let reachable: HashSet<CategoryId> = self
            .source
            .reachable_category_ids(shop.category.id)
            .await?
            .into_iter()
            .collect();
        let dispatch_ids = self.source.dispatch_ids().await?;
        let forbidden = group_forbidden_categories(self.source.forbidden_categories().await?);

        let eligible = eligible_dispatch_ids(&dispatch_ids, &reachable, &forbidden);
        debug!(
            total = dispatch_ids.len(),
            eligible = eligible.len(),
            "Resolved shop dispatches"
        );

        self.shipment_ids.insert(shop.id, eligible.clone());
        Ok(eligible)
    }

    /// Build the report section for `shop`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any query fails.
    pub async fn shipments(&mut self, shop: &Shop) -> Result<ShipmentsBenchmark, RepositoryError> {
        let ids = self.shipment_ids(shop).await?;
        let list = self.source.shipping_costs(&ids).await?.into_iter().collect();
        let usages = self.source.usages(&ids).await?;
        Ok(ShipmentsBenchmark { list, usages })
    }
}

#[async_trait]
impl<S: ShipmentSource> BenchmarkProvider for ShipmentsProvider<S> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn benchmark_data(&mut self, context: &ShopContext) -> Result<Value, BenchmarkError> {
        let data = self.shipments(&context.shop).await?;
        Ok(serde_json::to_value(data)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::super::tests::shop_context;
    use super::*;

    #[derive(Default)]
    struct Catalog {
        dispatches: Vec<(i32, &'static str, Vec<i64>)>,
        forbidden: Vec<(i32, i32)>,
        reachable: Vec<i32>,
        orders: Vec<i32>,
    }

    #[derive(Clone, Default)]
    struct InMemorySource {
        catalog: Arc<Mutex<Catalog>>,
        eligibility_queries: Arc<AtomicUsize>,
    }

    impl InMemorySource {
        fn catalog(&self) -> std::sync::MutexGuard<'_, Catalog> {
            self.catalog.lock().unwrap()
        }
    }

    #[async_trait]
    impl ShipmentSource for InMemorySource {
        async fn dispatch_ids(&self) -> Result<Vec<DispatchId>, RepositoryError> {
            self.eligibility_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .catalog()
                .dispatches
                .iter()
                .map(|(id, _, _)| DispatchId::new(*id))
                .collect())
        }

        async fn forbidden_categories(
            &self,
        ) -> Result<Vec<(DispatchId, CategoryId)>, RepositoryError> {
            Ok(self
                .catalog()
                .forbidden
                .iter()
                .map(|(d, c)| (DispatchId::new(*d), CategoryId::new(*c)))
                .collect())
        }

        async fn reachable_category_ids(
            &self,
            _root: CategoryId,
        ) -> Result<Vec<CategoryId>, RepositoryError> {
            Ok(self
                .catalog()
                .reachable
                .iter()
                .copied()
                .map(CategoryId::new)
                .collect())
        }

        async fn shipping_costs(
            &self,
            dispatch_ids: &[DispatchId],
        ) -> Result<Vec<(String, ShipmentCosts)>, RepositoryError> {
            Ok(self
                .catalog()
                .dispatches
                .iter()
                .filter(|(id, _, costs)| {
                    !costs.is_empty() && dispatch_ids.contains(&DispatchId::new(*id))
                })
                .map(|(_, name, costs)| {
                    let min = costs.iter().min().copied().unwrap_or_default();
                    let max = costs.iter().max().copied().unwrap_or_default();
                    (
                        (*name).to_string(),
                        ShipmentCosts {
                            min_price: Decimal::new(min, 2),
                            max_price: Decimal::new(max, 2),
                        },
                    )
                })
                .collect())
        }

        async fn usages(
            &self,
            dispatch_ids: &[DispatchId],
        ) -> Result<Vec<ShipmentUsage>, RepositoryError> {
            let catalog = self.catalog();
            Ok(catalog
                .dispatches
                .iter()
                .filter(|(id, _, _)| dispatch_ids.contains(&DispatchId::new(*id)))
                .filter_map(|(id, name, _)| {
                    let count = catalog.orders.iter().filter(|o| *o == id).count();
                    (count > 0).then(|| ShipmentUsage {
                        name: (*name).to_string(),
                        usages: i64::try_from(count).unwrap_or(i64::MAX),
                    })
                })
                .collect())
        }
    }

    fn source() -> InMemorySource {
        let source = InMemorySource::default();
        *source.catalog() = Catalog {
            dispatches: vec![
                (1, "Freight", vec![4900]),
                (2, "Standard", vec![390, 590]),
                (3, "Express", vec![990, 1490]),
            ],
            // Freight forbids every reachable category; Standard only one.
            forbidden: vec![(1, 5), (1, 12), (2, 5)],
            reachable: vec![5, 12],
            orders: vec![2, 2, 3],
        };
        source
    }

    #[tokio::test]
    async fn test_excludes_dispatch_forbidding_all_reachable_categories() {
        let mut provider = ShipmentsProvider::new(source());
        let ctx = shop_context(1, 5);

        let ids = provider.shipment_ids(&ctx.shop).await.unwrap();
        assert_eq!(ids, vec![DispatchId::new(2), DispatchId::new(3)]);
    }

    #[tokio::test]
    async fn test_eligibility_is_memoized_per_shop() {
        let source = source();
        let mut provider = ShipmentsProvider::new(source.clone());
        let ctx = shop_context(1, 5);

        let first = provider.shipment_ids(&ctx.shop).await.unwrap();
        // Underlying data changes; the cached list must not.
        source.catalog().forbidden.push((3, 5));
        source.catalog().forbidden.push((3, 12));
        let second = provider.shipment_ids(&ctx.shop).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.eligibility_queries.load(Ordering::SeqCst), 1);

        // A different shop is computed separately and sees the new data.
        let other = shop_context(2, 5);
        let ids = provider.shipment_ids(&other.shop).await.unwrap();
        assert_eq!(ids, vec![DispatchId::new(2)]);
        assert_eq!(source.eligibility_queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_benchmark_data_shape() {
        let mut provider = ShipmentsProvider::new(source());
        let ctx = shop_context(1, 5);

        assert_eq!(provider.name(), "shipments");
        let data = provider.benchmark_data(&ctx).await.unwrap();
        assert_eq!(
            data,
            json!({
                "list": {
                    "Standard": {"minPrice": 3.9, "maxPrice": 5.9},
                    "Express": {"minPrice": 9.9, "maxPrice": 14.9}
                },
                "usages": [
                    {"name": "Standard", "usages": 2},
                    {"name": "Express", "usages": 1}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_list_keeps_last_dispatch_for_duplicate_names() {
        let source = InMemorySource::default();
        *source.catalog() = Catalog {
            dispatches: vec![(2, "Standard", vec![390]), (4, "Standard", vec![450, 650])],
            reachable: vec![5],
            ..Catalog::default()
        };
        let mut provider = ShipmentsProvider::new(source);
        let ctx = shop_context(1, 5);

        let data = provider.shipments(&ctx.shop).await.unwrap();
        assert_eq!(data.list.len(), 1);
        assert_eq!(
            data.list.get("Standard"),
            Some(&ShipmentCosts {
                min_price: Decimal::new(450, 2),
                max_price: Decimal::new(650, 2),
            })
        );
        assert!(data.usages.is_empty());
    }
}
