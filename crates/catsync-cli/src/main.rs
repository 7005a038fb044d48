mod sync;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catsync_baselinker::BaselinkerClient;
use catsync_core::AppConfig;
use catsync_shopify::ShopifyClient;

#[derive(Debug, Parser)]
#[command(name = "catsync", version)]
#[command(about = "Sync Shopify product categories into a BaseLinker inventory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create missing `BaseLinker` categories from the Shopify category tree
    Categories,
    /// Assign `BaseLinker` products to the category of their Shopify counterpart
    Products,
    /// Run category sync, then product assignment
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = catsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "configuration loaded");
    if config.dry_run {
        tracing::info!("dry run enabled; no categories or products will be changed");
    }

    let (shopify, baselinker) = build_clients(&config)?;

    tracing::info!("fetching Shopify catalog");
    let source = sync::fetch_source_catalog(&shopify, config.shopify_page_size).await;

    match cli.command {
        Commands::Categories => {
            sync::run_category_sync(&config, &source, &baselinker).await?;
        }
        Commands::Products => {
            sync::run_product_sync(&config, &source, &baselinker).await;
        }
        Commands::All => {
            sync::run_all(&config, &source, &baselinker).await?;
        }
    }

    tracing::info!("sync process finished");
    Ok(())
}

fn build_clients(config: &AppConfig) -> anyhow::Result<(ShopifyClient, BaselinkerClient)> {
    let shopify = ShopifyClient::new(
        &config.shopify_store,
        &config.shopify_api_version,
        &config.shopify_access_token,
        config.request_timeout_secs,
    )?;
    let baselinker = BaselinkerClient::new(
        &config.baselinker_api_key,
        config.baselinker_inventory_id,
        config.request_timeout_secs,
    )?;
    Ok((shopify, baselinker))
}
