//! # Storefront Demo
//!
//! Walks through one shopper session against the snapshot files configured in
//! `storefront.toml` (or the embedded defaults):
//! 1. Resolving a cart left over from a previous run
//! 2. Seeding the catalog from the admin view
//! 3. Browsing, filling the cart and printing the order summary
//!
//! Run it twice to see the resume prompt kick in.

use storefront::cart_store::ResumePhase;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::{setup_tracing, Storefront};
use storefront::model::{CategoryFilter, ProductDraft};
use storefront::StorefrontError;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
    setup_tracing();

    let config = StorefrontConfig::load()?;
    info!(dir = %config.storage.dir.display(), "Starting storefront");
    let mut shop = Storefront::open(config).await?;

    // A cart from last time stays locked until the shopper decides
    if shop.resume_phase().await? == ResumePhase::AwaitingDecision {
        let items = shop.cart_items().await?;
        info!(lines = items.len(), "Found a previous order, continuing it");
        shop.continue_order().await?;
    }

    let span = tracing::info_span!("admin_seed");
    async {
        shop.set_admin(true).await?;
        if shop.catalog.products().await?.is_empty() {
            let mut dates = ProductDraft::new("Medjool Dates", 120.0);
            dates.original_price = Some(150.0);
            dates.category = Some("Dates".to_string());
            shop.save_product(None, dates).await?;

            let mut tea = ProductDraft::new("Mint Tea", 35.0);
            tea.category = Some("Drinks".to_string());
            shop.save_product(None, tea).await?;

            shop.save_product(None, ProductDraft::new("Gift Box", 200.0)).await?;
        }
        shop.set_admin(false).await?;
        Ok::<_, StorefrontError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("shopping");
    async {
        shop.set_search("dates");
        info!(searching = shop.is_searching(), "Search typed");

        for product in shop.visible_products().await? {
            let quantity = shop.add_to_cart(product.clone()).await?;
            info!(product = %product.name, quantity, "Added to cart");
        }

        shop.set_search("");
        shop.set_category(CategoryFilter::Only("Drinks".to_string()));
        if let Some(tea) = shop.visible_products().await?.into_iter().next() {
            shop.add_to_cart(tea.clone()).await?;
            shop.adjust_quantity(tea.id, 2).await?;
        }
        Ok::<_, StorefrontError>(())
    }
    .instrument(span)
    .await?;

    let summary = shop.order_summary().await?;
    for line in &summary.lines {
        info!(
            name = %line.name,
            quantity = line.quantity,
            total = line.line_total,
            savings = line.line_savings,
            "Order line"
        );
    }
    info!(total = summary.total, savings = summary.total_savings, "Order ready for checkout");

    match shop.export_catalog().await {
        Ok(path) => info!(path = %path.display(), "Catalog backed up"),
        Err(e) => warn!(error = %e, "Backup skipped"),
    }

    shop.shutdown().await?;

    info!("Session completed successfully");
    Ok(())
}
