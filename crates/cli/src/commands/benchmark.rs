//! Print a shop's benchmark report.
//!
//! ```bash
//! emporium-cli benchmark --shop-id 1
//! ```

use emporium_core::ShopId;
use emporium_storefront::benchmark::{BenchmarkCollector, ShipmentsProvider};
use emporium_storefront::config::StorefrontConfig;
use emporium_storefront::db::{self, PgShipmentSource};
use emporium_storefront::services::ContextService;
use uuid::Uuid;

/// Collect the benchmark report for `shop_id` and print it as JSON.
///
/// # Errors
///
/// Returns an error if the shop does not exist or a provider fails.
pub async fn run(
    shop_id: ShopId,
    language: Option<Uuid>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let context = ContextService::new(&pool, config.default_language)
        .shop_context(shop_id, None, language)
        .await?;

    let mut collector = BenchmarkCollector::new()
        .with_provider(ShipmentsProvider::new(PgShipmentSource::new(pool.clone())));
    let report = collector.collect(&context).await?;

    tracing::info!(shop_id = %shop_id, sections = report.len(), "Benchmark collected");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
