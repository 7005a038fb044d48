use thiserror::Error;

/// Errors returned by the `BaseLinker` connector client.
#[derive(Debug, Error)]
pub enum BaselinkerError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The connector answered with `"status": "ERROR"`.
    #[error("BaseLinker API error: {code} - {message}")]
    Api { code: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// `addInventoryCategory` succeeded but returned no usable id.
    #[error("no category id returned when creating \"{name}\"")]
    MissingCategoryId { name: String },
}
