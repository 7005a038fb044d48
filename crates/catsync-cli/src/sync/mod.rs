//! The two sync passes: category reconciliation and product-category
//! assignment. Both read from Shopify and write to `BaseLinker`.

mod categories;
mod error;
mod fetch;
mod products;
mod target;

use catsync_baselinker::BaselinkerClient;
use catsync_core::AppConfig;

use categories::ReconcileReport;
use error::SyncError;
use fetch::SourceCatalog;
use products::AssignReport;

pub(crate) use categories::run_category_sync;
pub(crate) use fetch::fetch_source_catalog;
pub(crate) use products::run_product_sync;

/// Runs category sync, then product assignment, over one Shopify catalog.
///
/// Product assignment reads the `BaseLinker` category list again, so it sees
/// the categories created by the first pass.
///
/// # Errors
///
/// Returns [`SyncError::MissingParent`] from category sync; product
/// assignment is then skipped.
pub(crate) async fn run_all(
    config: &AppConfig,
    source: &SourceCatalog,
    baselinker: &BaselinkerClient,
) -> Result<(ReconcileReport, AssignReport), SyncError> {
    let categories = run_category_sync(config, source, baselinker).await?;
    let products = run_product_sync(config, source, baselinker).await;
    Ok((categories, products))
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
