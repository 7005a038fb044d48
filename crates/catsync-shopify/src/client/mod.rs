//! HTTP client for the Shopify Admin GraphQL API.

mod endpoint;
mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ShopifyError;
use crate::query::products_request;
use crate::types::{GraphQlResponse, ProductConnection, ProductsData};

pub use endpoint::graphql_endpoint;
pub use fetch_all::ProductPages;

/// Maximum number of pages to fetch before giving up.
/// Prevents infinite loops on cycling cursors.
pub(super) const MAX_PAGES: usize = 1000;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client for the Shopify Admin GraphQL endpoint of a single store.
///
/// Every request is attempted once. Non-2xx statuses, transport failures,
/// undecodable bodies and GraphQL `errors` arrays all surface as
/// [`ShopifyError`] variants.
pub struct ShopifyClient {
    pub(super) client: Client,
    pub(super) endpoint: Url,
    access_token: String,
}

impl ShopifyClient {
    /// Creates a client for `store` (e.g. `"my-store.myshopify.com"`) using
    /// the given Admin API version.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidStore`] if the store cannot be turned
    /// into an endpoint URL, or [`ShopifyError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        store: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let endpoint = graphql_endpoint(store, api_version)?;
        Self::with_endpoint(endpoint.as_str(), access_token, timeout_secs)
    }

    /// Creates a client that posts to an explicit GraphQL URL (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidStore`] if `endpoint` is not a valid
    /// URL, or [`ShopifyError::Http`] if the client cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("catsync/0.1 (category-sync)")
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| ShopifyError::InvalidStore {
            store: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    /// The GraphQL URL this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches one page of products.
    ///
    /// `after` is the `endCursor` of the previous page, or `None` for the
    /// first page.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Http`] on network failure.
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::Deserialize`] if the body does not match the query shape.
    /// - [`ShopifyError::GraphQl`] if the response carries GraphQL errors.
    /// - [`ShopifyError::MissingData`] if `data.products` is absent.
    pub async fn fetch_products_page(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<ProductConnection, ShopifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&products_request(first, after))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: GraphQlResponse<ProductsData> =
            serde_json::from_str(&body).map_err(|e| ShopifyError::Deserialize {
                context: format!("products page after {}", after.unwrap_or("start")),
                source: e,
            })?;

        Self::into_products(parsed)
    }

    /// Unwraps the GraphQL envelope, surfacing `errors` before looking at
    /// `data`.
    fn into_products(
        response: GraphQlResponse<ProductsData>,
    ) -> Result<ProductConnection, ShopifyError> {
        if !response.errors.is_empty() {
            let messages: Vec<&str> = response
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect();
            return Err(ShopifyError::GraphQl(messages.join("; ")));
        }

        response
            .data
            .and_then(|data| data.products)
            .ok_or(ShopifyError::MissingData)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
