//! Error types for Gamesight.

use thiserror::Error;

/// Primary error type for all Gamesight operations.
#[derive(Error, Debug)]
pub enum GamesightError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Query store lookup failed: {0}")]
    Lookup(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl GamesightError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error came from the transport layer rather than the
    /// payload (useful when deciding what to surface to the user).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GamesightError>;
