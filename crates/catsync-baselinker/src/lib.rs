pub mod batch;
pub mod client;
pub mod error;
pub mod types;

pub use batch::BatchedProducts;
pub use client::BaselinkerClient;
pub use error::BaselinkerError;
