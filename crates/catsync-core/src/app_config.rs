#[derive(Clone)]
pub struct AppConfig {
    /// Shopify store domain, e.g. `"my-store.myshopify.com"`.
    pub shopify_store: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
    pub baselinker_api_key: String,
    pub baselinker_inventory_id: i64,
    /// When `true`, every create/update call is replaced by a log line.
    pub dry_run: bool,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub shopify_page_size: u32,
    pub product_batch_size: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shopify_store", &self.shopify_store)
            .field("shopify_access_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field("baselinker_api_key", &"[redacted]")
            .field("baselinker_inventory_id", &self.baselinker_inventory_id)
            .field("dry_run", &self.dry_run)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("shopify_page_size", &self.shopify_page_size)
            .field("product_batch_size", &self.product_batch_size)
            .finish()
    }
}
