use thiserror::Error;

/// Errors that can occur during recipe search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP transport failure while talking to a recipe source
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered but its payload could not be decoded
    #[error("Malformed response from source: {0}")]
    MalformedResponse(String),

    /// The source reported a failure of its own
    #[error("{0}")]
    Source(String),

    /// Reading or writing the managed-recipes file failed
    #[error("Recipe store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    /// The managed-recipes file holds invalid JSON
    #[error("Recipe store contains invalid JSON: {0}")]
    StoreFormat(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
