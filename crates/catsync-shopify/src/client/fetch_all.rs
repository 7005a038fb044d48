//! Multi-page product fetch loop for `ShopifyClient`.

use crate::error::ShopifyError;
use crate::pagination::next_cursor;
use crate::types::ProductNode;

use super::ShopifyClient;
use super::MAX_PAGES;

/// Products collected by [`ShopifyClient::fetch_all_products`].
///
/// When a page fails, `interrupted` holds the error and `products` holds
/// everything collected from the pages before it.
#[derive(Debug, Default)]
pub struct ProductPages {
    pub products: Vec<ProductNode>,
    pub pages: usize,
    pub interrupted: Option<ShopifyError>,
}

impl ProductPages {
    /// `true` when every page up to the last one was fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

impl ShopifyClient {
    /// Fetches all products by following `endCursor` until `hasNextPage` is
    /// false.
    ///
    /// Pages are requested strictly one after another. A failing page stops
    /// the loop: the cursor of the page after it is unknown, so nothing
    /// further can be requested. The failure is logged and returned in
    /// [`ProductPages::interrupted`] alongside the products gathered so far.
    pub async fn fetch_all_products(&self, page_size: u32) -> ProductPages {
        let mut result = ProductPages::default();
        let mut cursor: Option<String> = None;

        loop {
            if result.pages >= MAX_PAGES {
                let err = ShopifyError::PaginationLimit {
                    store: self.endpoint.to_string(),
                    max_pages: MAX_PAGES,
                };
                tracing::error!(error = %err, "stopping product pagination");
                result.interrupted = Some(err);
                break;
            }

            let page = match self.fetch_products_page(page_size, cursor.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        page = result.pages + 1,
                        fetched = result.products.len(),
                        error = %e,
                        "error fetching Shopify products page; keeping partial result"
                    );
                    result.interrupted = Some(e);
                    break;
                }
            };
            result.pages += 1;

            cursor = next_cursor(&page.page_info);
            result
                .products
                .extend(page.edges.into_iter().map(|edge| edge.node));

            tracing::debug!(
                page = result.pages,
                total = result.products.len(),
                "fetched Shopify products page"
            );

            if cursor.is_none() {
                break;
            }
        }

        result
    }
}
