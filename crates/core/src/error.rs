//! Error types for vpcsync

use thiserror::Error;

/// Result type alias using the core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by the subnet lifecycle API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The subnet identifier no longer exists on the provider
    #[error("The subnet ID '{subnet_id}' does not exist")]
    NotFound { subnet_id: String },

    /// The provider rejected the request
    #[error("{message}")]
    Api { code: String, message: String },

    /// The request never produced a provider answer
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }
}

/// Failures of the state persistence layer
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error returned by `deploy` and `remove`
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl Error {
    /// The provider error, when this came from the lifecycle API
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Error::Provider(e) => Some(e),
            Error::State(_) => None,
        }
    }
}
