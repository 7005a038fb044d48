//! GraphQL documents sent to the Shopify Admin API.

/// One page of products with the fields needed for both category and
/// product sync. Paged with `$first` / `$after`.
pub const PRODUCTS_QUERY: &str = r"
query Products($first: Int!, $after: String) {
    products(first: $first, after: $after) {
        edges {
            node {
                id
                title
                category {
                    name
                    fullName
                }
                variants(first: 1) {
                    edges {
                        node {
                            sku
                        }
                    }
                }
            }
        }
        pageInfo {
            hasNextPage
            endCursor
        }
    }
}
";

/// Builds the JSON request body for [`PRODUCTS_QUERY`].
#[must_use]
pub fn products_request(first: u32, after: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "query": PRODUCTS_QUERY,
        "variables": {
            "first": first,
            "after": after,
        },
    })
}
