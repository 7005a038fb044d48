pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod query;
pub mod types;

pub use client::{ProductPages, ShopifyClient};
pub use error::ShopifyError;
pub use normalize::{collect_category_paths, normalize_product};
pub use types::{ProductConnection, ProductNode};
