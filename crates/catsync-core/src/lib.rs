pub mod app_config;
pub mod categories;
pub mod config;
pub mod products;

pub use app_config::AppConfig;
pub use categories::{build_tree, CategoryNode, CategoryPath, CategoryTree, ParentConflict};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{RemoteCategory, SkuIndex, SourceProduct, TargetProduct};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
