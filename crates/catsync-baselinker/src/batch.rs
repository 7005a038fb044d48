//! Batched product detail fetch.

use catsync_core::TargetProduct;

use crate::client::BaselinkerClient;

/// Result of [`BaselinkerClient::fetch_products_in_batches`].
#[derive(Debug, Default)]
pub struct BatchedProducts {
    /// Products from every batch that succeeded, ordered by id.
    pub products: Vec<TargetProduct>,
    pub batches: usize,
    pub failed_batches: usize,
}

impl BaselinkerClient {
    /// Fetches product details for `product_ids`, `batch_size` ids per call.
    ///
    /// Batches run one after another. A failing batch is logged and skipped,
    /// so the result may silently lack the products of that batch;
    /// `failed_batches` counts them. A `batch_size` of `0` is treated as `1`.
    pub async fn fetch_products_in_batches(
        &self,
        product_ids: &[i64],
        batch_size: usize,
    ) -> BatchedProducts {
        let mut result = BatchedProducts::default();

        for (index, batch) in product_ids.chunks(batch_size.max(1)).enumerate() {
            result.batches += 1;
            match self.get_products_data(batch).await {
                Ok(products) => result.products.extend(products),
                Err(e) => {
                    result.failed_batches += 1;
                    tracing::error!(
                        batch = index + 1,
                        first_id = batch.first().copied(),
                        size = batch.len(),
                        error = %e,
                        "error fetching BaseLinker product details; skipping batch"
                    );
                }
            }
        }

        result.products.sort_by_key(|p| p.id);
        result
    }
}
