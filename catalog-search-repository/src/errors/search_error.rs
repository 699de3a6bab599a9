//! Unified error type for search operations.

use thiserror::Error;

/// Errors from search operations.
///
/// Used by the `SearchIndexProvider` trait and `SearchService` for all
/// operations. Completed-but-rejected write statuses are not errors; they
/// are modeled as [`crate::types::WriteAck::Rejected`] and handled by the
/// service's retry policy.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed caller input (e.g., empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to construct the client connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request never completed: the engine could not be reached or the
    /// response was cut short. Write paths surface this immediately without
    /// consuming retry attempts.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// A search request completed with a non-success status.
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Failed to interpret a response from the engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a document for the engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The named aggregation was absent from the response.
    #[error("Aggregation not found: {0}")]
    AggregationNotFound(String),

    /// Batch size exceeds the configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SearchError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a failed-search error.
    pub fn search_failed(msg: impl Into<String>) -> Self {
        Self::SearchFailed(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a missing-aggregation error.
    pub fn aggregation_not_found(name: impl Into<String>) -> Self {
        Self::AggregationNotFound(name.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }
}
