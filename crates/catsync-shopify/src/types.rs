//! Shopify Admin GraphQL response types for the products query in
//! [`crate::query::PRODUCTS_QUERY`].
//!
//! ## Observed shape
//!
//! ### Envelope
//! Every GraphQL response is `{"data": ..., "errors": [...]}`. A query that
//! fails validation or hits a throttle still returns HTTP 200 with `data`
//! set to `null` and a non-empty `errors` array, so the body has to be
//! inspected even on success statuses.
//!
//! ### `category`
//! The product's standard taxonomy category. `null` when the merchant never
//! assigned one. `fullName` is the `" > "`-joined path from the taxonomy
//! root, e.g. `"Apparel & Accessories > Shoes > Athletic Shoes"`, and
//! `name` is its last segment.
//!
//! ### `variants(first: 1)`
//! Only the first variant is requested; its SKU stands in for the product.
//! `sku` is `null` or `""` on products the merchant never gave one.

use serde::Deserialize;

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single entry of the GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` payload of the products query.
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Option<ProductConnection>,
}

/// One page of the `products` connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default)]
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdge {
    pub node: ProductNode,
}

/// Relay-style pagination state for a connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A storefront product as returned by the products query.
#[derive(Debug, Deserialize)]
pub struct ProductNode {
    /// Global ID, e.g. `"gid://shopify/Product/7982301"`.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<TaxonomyCategory>,
    #[serde(default)]
    pub variants: VariantConnection,
}

impl ProductNode {
    /// SKU of the first variant, if any.
    #[must_use]
    pub fn first_sku(&self) -> Option<&str> {
        self.variants
            .edges
            .first()
            .and_then(|edge| edge.node.sku.as_deref())
    }
}

/// Standard product taxonomy category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyCategory {
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VariantConnection {
    #[serde(default)]
    pub edges: Vec<VariantEdge>,
}

#[derive(Debug, Deserialize)]
pub struct VariantEdge {
    pub node: VariantNode,
}

#[derive(Debug, Deserialize)]
pub struct VariantNode {
    #[serde(default)]
    pub sku: Option<String>,
}
