//! Error types for explainer

use thiserror::Error;

/// Core error type for database and configuration operations
#[derive(Error, Debug)]
pub enum ExplainerError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    /// The server refused a new connection (MySQL error 1040)
    #[error("Too many connections: {0}")]
    TooManyConnections(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ExplainerError {
    /// Returns true when the engine refused to hand out another connection.
    ///
    /// Drivers should map the condition to [`ExplainerError::TooManyConnections`],
    /// but the message check also catches drivers that only forward the text.
    pub fn is_too_many_connections(&self) -> bool {
        match self {
            Self::TooManyConnections(_) => true,
            Self::Connection(msg) | Self::Query(msg) | Self::Other(msg) => {
                msg.to_lowercase().contains("too many connections")
            }
            _ => false,
        }
    }
}

/// Result type alias for explainer operations
pub type Result<T> = std::result::Result<T, ExplainerError>;
