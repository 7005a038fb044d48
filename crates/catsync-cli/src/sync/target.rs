//! Mutating operations on the inventory platform, behind traits so the
//! reconciler and assigner can run against in-memory fakes.

use catsync_baselinker::{BaselinkerClient, BaselinkerError};

pub(crate) trait CategoryTarget {
    /// Creates `name` under `parent_id` (`0` for a root) and returns the new id.
    async fn create_category(&self, name: &str, parent_id: i64) -> Result<i64, BaselinkerError>;
}

pub(crate) trait ProductTarget {
    async fn update_product_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<(), BaselinkerError>;
}

impl CategoryTarget for BaselinkerClient {
    async fn create_category(&self, name: &str, parent_id: i64) -> Result<i64, BaselinkerError> {
        self.add_category(name, parent_id).await
    }
}

impl ProductTarget for BaselinkerClient {
    async fn update_product_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<(), BaselinkerError> {
        BaselinkerClient::update_product_category(self, product_id, category_id).await
    }
}
