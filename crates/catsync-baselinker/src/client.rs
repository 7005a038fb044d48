//! HTTP client for the `BaseLinker` connector API.
//!
//! Every operation is a form-encoded `POST` to a single endpoint carrying
//! `method` and a JSON-encoded `parameters` field, authenticated with the
//! `X-BLToken` header. All calls check the `"status"` field in the JSON
//! envelope and surface API-level errors as [`BaselinkerError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use catsync_core::{RemoteCategory, TargetProduct};

use crate::error::BaselinkerError;
use crate::types::{
    AddCategoryResponse, CategoriesResponse, ProductsDataResponse, ProductsListResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.baselinker.com/connector.php";

const TOKEN_HEADER: &str = "X-BLToken";

/// Page size of `getInventoryProductsList`; a shorter page is the last one.
pub const PRODUCTS_LIST_PAGE_SIZE: usize = 1000;

/// Upper bound on product list pages, guarding against a connector that
/// keeps returning full pages.
const MAX_PRODUCT_LIST_PAGES: u32 = 500;

/// Client for one `BaseLinker` inventory (catalog).
///
/// Use [`BaselinkerClient::new`] for production or
/// [`BaselinkerClient::with_base_url`] to point at a mock server in tests.
pub struct BaselinkerClient {
    client: Client,
    api_key: String,
    inventory_id: i64,
    base_url: Url,
}

impl BaselinkerClient {
    /// Creates a new client pointed at the production connector.
    ///
    /// # Errors
    ///
    /// Returns [`BaselinkerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        inventory_id: i64,
        timeout_secs: u64,
    ) -> Result<Self, BaselinkerError> {
        Self::with_base_url(api_key, inventory_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom connector URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`BaselinkerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BaselinkerError::Api`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        inventory_id: i64,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, BaselinkerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("catsync/0.1 (category-sync)")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| BaselinkerError::Api {
            code: "INVALID_URL".to_owned(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            inventory_id,
            base_url,
        })
    }

    #[must_use]
    pub fn inventory_id(&self) -> i64 {
        self.inventory_id
    }

    /// Lists every category of the inventory.
    ///
    /// # Errors
    ///
    /// - [`BaselinkerError::Api`] if the connector returns an error status.
    /// - [`BaselinkerError::Http`] on network failure or non-2xx HTTP status.
    /// - [`BaselinkerError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_categories(&self) -> Result<Vec<RemoteCategory>, BaselinkerError> {
        let response: CategoriesResponse = self
            .call(
                "getInventoryCategories",
                json!({ "inventory_id": self.inventory_id }),
            )
            .await?;
        Ok(response.into_categories())
    }

    /// Creates a category under `parent_id` (`0` for a root) and returns
    /// its new id.
    ///
    /// # Errors
    ///
    /// - [`BaselinkerError::Api`] if the connector returns an error status.
    /// - [`BaselinkerError::Http`] on network failure or non-2xx HTTP status.
    /// - [`BaselinkerError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`BaselinkerError::MissingCategoryId`] if no id came back.
    pub async fn add_category(&self, name: &str, parent_id: i64) -> Result<i64, BaselinkerError> {
        let response: AddCategoryResponse = self
            .call(
                "addInventoryCategory",
                json!({
                    "inventory_id": self.inventory_id,
                    "parent_id": parent_id,
                    "name": name,
                }),
            )
            .await?;

        response
            .category_id
            .filter(|&id| id != 0)
            .ok_or_else(|| BaselinkerError::MissingCategoryId {
                name: name.to_owned(),
            })
    }

    /// Fetches one page (1-based) of product ids.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_categories`].
    pub async fn get_product_ids_page(&self, page: u32) -> Result<Vec<i64>, BaselinkerError> {
        let response: ProductsListResponse = self
            .call(
                "getInventoryProductsList",
                json!({ "inventory_id": self.inventory_id, "page": page }),
            )
            .await?;
        Ok(response.into_ids())
    }

    /// Lists every product id of the inventory, page by page, until a page
    /// shorter than [`PRODUCTS_LIST_PAGE_SIZE`] is returned.
    ///
    /// # Errors
    ///
    /// Propagates the first page failure; ids from earlier pages are
    /// discarded.
    pub async fn list_product_ids(&self) -> Result<Vec<i64>, BaselinkerError> {
        let mut ids = Vec::new();
        for page in 1..=MAX_PRODUCT_LIST_PAGES {
            let batch = self.get_product_ids_page(page).await?;
            let is_last = batch.len() < PRODUCTS_LIST_PAGE_SIZE;
            ids.extend(batch);
            if is_last {
                return Ok(ids);
            }
        }
        tracing::warn!(
            pages = MAX_PRODUCT_LIST_PAGES,
            fetched = ids.len(),
            "product list page limit reached; remaining ids not fetched"
        );
        Ok(ids)
    }

    /// Fetches full records for `product_ids` in a single call.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_categories`].
    pub async fn get_products_data(
        &self,
        product_ids: &[i64],
    ) -> Result<Vec<TargetProduct>, BaselinkerError> {
        let response: ProductsDataResponse = self
            .call(
                "getInventoryProductsData",
                json!({ "inventory_id": self.inventory_id, "products": product_ids }),
            )
            .await?;
        Ok(response.into_products())
    }

    /// Moves an existing product into `category_id`.
    ///
    /// Uses `addInventoryProduct` with an explicit `product_id`, which the
    /// connector treats as an update of that product.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_categories`].
    pub async fn update_product_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<(), BaselinkerError> {
        let _: serde_json::Value = self
            .call(
                "addInventoryProduct",
                json!({
                    "inventory_id": self.inventory_id,
                    "product_id": product_id,
                    "category_id": category_id,
                }),
            )
            .await?;
        Ok(())
    }

    /// Sends one connector call, checks the envelope status, and decodes
    /// the body.
    async fn call<T>(&self, method: &str, parameters: serde_json::Value) -> Result<T, BaselinkerError>
    where
        T: DeserializeOwned,
    {
        let parameters = parameters.to_string();
        let response = self
            .client
            .post(self.base_url.clone())
            .header(TOKEN_HEADER, &self.api_key)
            .form(&[("method", method), ("parameters", parameters.as_str())])
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| BaselinkerError::Deserialize {
                context: method.to_owned(),
                source: e,
            })?;
        Self::check_api_error(&value)?;

        serde_json::from_value(value).map_err(|e| BaselinkerError::Deserialize {
            context: method.to_owned(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), BaselinkerError> {
        if body.get("status").and_then(serde_json::Value::as_str) == Some("ERROR") {
            let field = |key: &str| {
                body.get(key)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
                    .to_owned()
            };
            return Err(BaselinkerError::Api {
                code: field("error_code"),
                message: field("error_message"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
