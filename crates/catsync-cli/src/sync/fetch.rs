//! Read side of a sync run.
//!
//! Every fetch here swallows its failure after logging it: a failed listing
//! yields an empty or partial collection instead of an error, so a run keeps
//! going with whatever data it could get.

use catsync_baselinker::BaselinkerClient;
use catsync_core::{CategoryPath, RemoteCategory, SourceProduct, TargetProduct};
use catsync_shopify::{collect_category_paths, normalize_product, ShopifyClient};

/// Everything both syncs need from the Shopify catalog.
#[derive(Debug, Default)]
pub(crate) struct SourceCatalog {
    /// Distinct category paths used by products, first-seen order.
    pub paths: Vec<CategoryPath>,
    pub products: Vec<SourceProduct>,
}

/// Pages through the Shopify catalog once and derives both the category
/// paths and the normalized products from it.
pub(crate) async fn fetch_source_catalog(shopify: &ShopifyClient, page_size: u32) -> SourceCatalog {
    let pages = shopify.fetch_all_products(page_size).await;
    if !pages.is_complete() {
        tracing::warn!(
            fetched = pages.products.len(),
            "Shopify catalog fetch was interrupted; continuing with partial catalog"
        );
    }

    let paths = collect_category_paths(&pages.products);
    let products: Vec<SourceProduct> = pages.products.into_iter().map(normalize_product).collect();
    tracing::info!(
        products = products.len(),
        paths = paths.len(),
        "fetched Shopify catalog"
    );
    SourceCatalog { paths, products }
}

/// Existing `BaseLinker` categories; empty if the listing fails.
pub(crate) async fn fetch_target_categories(baselinker: &BaselinkerClient) -> Vec<RemoteCategory> {
    match baselinker.get_categories().await {
        Ok(categories) => {
            tracing::info!(categories = categories.len(), "fetched BaseLinker categories");
            categories
        }
        Err(e) => {
            tracing::error!(error = %e, "error fetching BaseLinker categories; treating as empty");
            Vec::new()
        }
    }
}

/// Every `BaseLinker` product id; empty if the listing fails.
pub(crate) async fn fetch_target_product_ids(baselinker: &BaselinkerClient) -> Vec<i64> {
    match baselinker.list_product_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "error fetching BaseLinker product ids");
            Vec::new()
        }
    }
}

/// Full `BaseLinker` product records for `product_ids`, fetched in batches.
pub(crate) async fn fetch_target_products(
    baselinker: &BaselinkerClient,
    product_ids: &[i64],
    batch_size: usize,
) -> Vec<TargetProduct> {
    tracing::info!(
        products = product_ids.len(),
        "fetching BaseLinker product details"
    );
    let batched = baselinker
        .fetch_products_in_batches(product_ids, batch_size)
        .await;
    if batched.failed_batches > 0 {
        tracing::warn!(
            failed_batches = batched.failed_batches,
            batches = batched.batches,
            fetched = batched.products.len(),
            "some BaseLinker product batches failed; continuing with partial list"
        );
    }
    batched.products
}
