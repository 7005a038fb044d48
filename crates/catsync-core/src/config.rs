use crate::app_config::AppConfig;
use crate::ConfigError;

/// Shopify's GraphQL connection limit for `products(first: ..)`.
const MAX_SHOPIFY_PAGE_SIZE: u32 = 250;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let shopify_store = require("SHOPIFY_STORE")?;
    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let baselinker_api_key = require("BASELINKER_API_KEY")?;
    let baselinker_inventory_id = require("BASELINKER_INVENTORY_ID")?
        .trim()
        .parse::<i64>()
        .map_err(|e| invalid("BASELINKER_INVENTORY_ID", e.to_string()))?;

    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2023-10");
    let dry_run = parse_dry_run(&or_default("DRY_RUN", "false"));
    let log_level = or_default("CATSYNC_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("CATSYNC_REQUEST_TIMEOUT_SECS", "30")?;

    let shopify_page_size = parse_u32("CATSYNC_SHOPIFY_PAGE_SIZE", "250")?;
    if shopify_page_size == 0 || shopify_page_size > MAX_SHOPIFY_PAGE_SIZE {
        return Err(invalid(
            "CATSYNC_SHOPIFY_PAGE_SIZE",
            format!("must be between 1 and {MAX_SHOPIFY_PAGE_SIZE}, got {shopify_page_size}"),
        ));
    }

    let product_batch_size = parse_usize("CATSYNC_PRODUCT_BATCH_SIZE", "50")?;
    if product_batch_size == 0 {
        return Err(invalid(
            "CATSYNC_PRODUCT_BATCH_SIZE",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        shopify_store,
        shopify_access_token,
        shopify_api_version,
        baselinker_api_key,
        baselinker_inventory_id,
        dry_run,
        log_level,
        request_timeout_secs,
        shopify_page_size,
        product_batch_size,
    })
}

/// Only the exact string `"true"` enables dry-run mode.
fn parse_dry_run(s: &str) -> bool {
    s == "true"
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
