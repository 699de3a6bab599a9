//! # Catalog Search Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes definitions for errors, interfaces, a concrete
//! implementation for OpenSearch, and the `SearchService` facade that applies
//! the write retry policy and shapes engine responses.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::{SearchConfig, SearchServiceConfig};
pub use errors::SearchError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchProvider;
pub use service::SearchService;
pub use types::{BulkOutcome, WriteAck};
