//! Error types for the catalog search repository.
//!
//! This module provides a unified error type for all search operations.

mod search_error;

pub use search_error::SearchError;
