//! Admin API endpoint construction for the Shopify client.

use reqwest::Url;

use crate::error::ShopifyError;

/// Builds the Admin GraphQL endpoint for a store.
///
/// Accepts a bare domain (`"my-store.myshopify.com"`) or a full URL
/// (`"https://my-store.myshopify.com/admin"`); only the origin is kept.
/// Bare domains are assumed to be HTTPS.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidStore`] if no host can be extracted.
pub fn graphql_endpoint(store: &str, api_version: &str) -> Result<Url, ShopifyError> {
    let trimmed = store.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| ShopifyError::InvalidStore {
        store: store.to_owned(),
        reason: e.to_string(),
    })?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ShopifyError::InvalidStore {
            store: store.to_owned(),
            reason: "no host".to_owned(),
        });
    }

    let origin = parsed.origin().ascii_serialization();
    let endpoint = format!("{origin}/admin/api/{api_version}/graphql.json");
    Url::parse(&endpoint).map_err(|e| ShopifyError::InvalidStore {
        store: store.to_owned(),
        reason: e.to_string(),
    })
}
