//! OpenSASE Storefront - catalog browser
//!
//! `opensase-storefront [search term...]`, with `STOREFRONT_CATEGORY` to
//! narrow by category.

use std::sync::Arc;
use opensase_storefront::{filter_products, suggestions, CatalogTask, Config, FilterCriteria, HttpCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = Config::from_env()?;
    let search = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let mut criteria = FilterCriteria::new().with_search(search);
    if let Ok(category) = std::env::var("STOREFRONT_CATEGORY") {
        criteria = criteria.with_category(category);
    }
    run(&config, &criteria).await?;
    Ok(())
}

async fn run(config: &Config, criteria: &FilterCriteria) -> opensase_storefront::Result<()> {
    tracing::info!(catalog = %config.catalog_base_url, "loading catalog");
    let source = Arc::new(HttpCatalog::new(config)?);
    let snapshot = CatalogTask::spawn(source).join().await?;

    let matches = filter_products(&snapshot.products, criteria);
    tracing::info!(total = snapshot.products.len(), matched = matches.len(), categories = ?snapshot.category_options(), "catalog loaded");
    for product in &matches {
        tracing::info!(id = %product.id(), price = %product.price(), category = product.category(), "{}", product.title());
    }
    if let Some(term) = criteria.active_search() {
        tracing::info!(suggestions = ?suggestions(&snapshot.products, term), "suggestions for {term:?}");
    }
    Ok(())
}
