//! Error types for the catalog search application.

use thiserror::Error;

use catalog_search_repository::SearchError;

/// Errors that can occur during application startup or execution.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The engine answered the health check with a non-success status.
    #[error("Search engine unhealthy at {0}")]
    EngineUnhealthy(String),

    /// Error from the search layer.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
