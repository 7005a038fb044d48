use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The GraphQL endpoint answered 200 but reported errors in the body.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("GraphQL response carried no products data")]
    MissingData,

    #[error("pagination limit reached for {store}: exceeded {max_pages} pages")]
    PaginationLimit { store: String, max_pages: usize },

    #[error("invalid store \"{store}\": {reason}")]
    InvalidStore { store: String, reason: String },
}
