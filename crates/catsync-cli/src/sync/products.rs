//! Product-category assignment: move each `BaseLinker` product into the
//! category its Shopify counterpart (matched by SKU) carries.

use std::collections::HashMap;

use catsync_baselinker::BaselinkerClient;
use catsync_core::products::{category_ids_by_name, normalize_sku};
use catsync_core::{AppConfig, RemoteCategory, SkuIndex, SourceProduct, TargetProduct};

use super::fetch::{self, SourceCatalog};
use super::target::ProductTarget;

/// Counts of what an assignment pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct AssignReport {
    pub matched: usize,
    pub updated: usize,
    /// Updates a dry run would have made.
    pub planned: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub skipped_no_sku: usize,
    pub skipped_duplicate_sku: usize,
    pub skipped_unmatched: usize,
    pub skipped_no_category: usize,
    pub skipped_unknown_category: usize,
}

/// One source product paired with the target product sharing its SKU.
#[derive(Debug)]
pub(crate) struct ProductMapping<'a> {
    pub sku: &'a str,
    pub source: &'a SourceProduct,
    pub target: Option<&'a TargetProduct>,
}

/// Pairs source products with target products by exact SKU.
///
/// Source products without a SKU are left out. When several source products
/// share a SKU only the first is kept; the same holds on the target side
/// (see [`SkuIndex`]). Mappings keep source order.
pub(crate) fn map_by_sku<'a>(
    source: &'a [SourceProduct],
    index: &SkuIndex<'a>,
    report: &mut AssignReport,
) -> Vec<ProductMapping<'a>> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut mappings = Vec::new();

    for product in source {
        let Some(sku) = normalize_sku(product.sku.as_deref()) else {
            tracing::info!(product = %product.title, "skipping product without SKU");
            report.skipped_no_sku += 1;
            continue;
        };
        if let Some(first) = seen.get(sku) {
            tracing::warn!(
                sku,
                product = %product.title,
                first = %first,
                "SKU used by more than one Shopify product; keeping the first"
            );
            report.skipped_duplicate_sku += 1;
            continue;
        }
        seen.insert(sku, product.title.as_str());
        mappings.push(ProductMapping {
            sku,
            source: product,
            target: index.get(sku),
        });
    }

    mappings
}

/// Updates the category of every matched target product whose current
/// category differs from the one its source product carries.
///
/// Nothing here is fatal: each skip or failed update is logged and counted.
pub(crate) async fn assign<T>(
    source: &[SourceProduct],
    targets: &[TargetProduct],
    categories: &[RemoteCategory],
    target: &T,
    dry_run: bool,
) -> AssignReport
where
    T: ProductTarget,
{
    let mut report = AssignReport::default();
    let index = SkuIndex::build(targets);
    let category_ids = category_ids_by_name(categories);

    for mapping in map_by_sku(source, &index, &mut report) {
        let ProductMapping {
            sku,
            source,
            target: matched,
        } = mapping;

        let Some(existing) = matched else {
            tracing::warn!(
                sku,
                product = %source.title,
                "skipping product that does not exist in BaseLinker"
            );
            report.skipped_unmatched += 1;
            continue;
        };
        report.matched += 1;

        let Some(category_name) = source.category_name.as_deref() else {
            tracing::info!(sku, product = %source.title, "skipping product without category");
            report.skipped_no_category += 1;
            continue;
        };

        let Some(&category_id) = category_ids.get(category_name) else {
            tracing::error!(
                sku,
                category = category_name,
                "no matching BaseLinker category; run category sync first"
            );
            report.skipped_unknown_category += 1;
            continue;
        };

        let name = existing.display_name();
        if existing.current_category_id == Some(category_id) {
            tracing::info!(
                sku,
                product = %name,
                category_id,
                "no change needed, already in correct category"
            );
            report.unchanged += 1;
            continue;
        }

        if dry_run {
            tracing::info!(
                dry_run = true,
                sku,
                product = %name,
                category = category_name,
                category_id,
                "would update product category"
            );
            report.planned += 1;
            continue;
        }

        tracing::info!(sku, product = %name, category = category_name, "updating product category");
        match target.update_product_category(existing.id, category_id).await {
            Ok(()) => report.updated += 1,
            Err(e) => {
                tracing::error!(
                    sku,
                    product_id = existing.id,
                    error = %e,
                    "error updating product category"
                );
                report.failed += 1;
            }
        }
    }

    report
}

/// Fetches the `BaseLinker` products and categories, then assigns each
/// matched product the category of its Shopify counterpart.
///
/// Returns an empty report without touching anything when `BaseLinker` lists
/// no products.
pub(crate) async fn run_product_sync(
    config: &AppConfig,
    source: &SourceCatalog,
    baselinker: &BaselinkerClient,
) -> AssignReport {
    tracing::info!("fetching BaseLinker product ids");
    let ids = fetch::fetch_target_product_ids(baselinker).await;
    if ids.is_empty() {
        tracing::error!("no BaseLinker products found; aborting product sync");
        return AssignReport::default();
    }

    let targets = fetch::fetch_target_products(baselinker, &ids, config.product_batch_size).await;

    tracing::info!("fetching BaseLinker categories");
    let categories = fetch::fetch_target_categories(baselinker).await;

    tracing::info!(dry_run = config.dry_run, "assigning categories");
    let report = assign(
        &source.products,
        &targets,
        &categories,
        baselinker,
        config.dry_run,
    )
    .await;
    tracing::info!(
        matched = report.matched,
        updated = report.updated,
        planned = report.planned,
        unchanged = report.unchanged,
        failed = report.failed,
        skipped_no_sku = report.skipped_no_sku,
        skipped_duplicate_sku = report.skipped_duplicate_sku,
        skipped_unmatched = report.skipped_unmatched,
        skipped_no_category = report.skipped_no_category,
        skipped_unknown_category = report.skipped_unknown_category,
        dry_run = config.dry_run,
        "product sync complete"
    );
    report
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
