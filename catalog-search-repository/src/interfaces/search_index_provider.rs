//! Search index provider trait definition.
//!
//! This module defines the abstract interface for single-attempt engine
//! operations, allowing for different backend implementations (OpenSearch,
//! Elasticsearch, mocks for testing).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{BulkOutcome, WriteAck};

/// Abstracts the underlying search engine implementation.
///
/// Every method performs exactly one request/response exchange. Retry policy
/// and response shaping live above this seam, in
/// [`crate::service::SearchService`], so they can be exercised against mock
/// implementations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
/// Implementations hold no per-call state, so a single instance may be shared
/// by concurrent callers without additional coordination.
///
/// # Error Handling
///
/// A write or delete request that completes with an undesired status is not
/// an error: it is reported as [`WriteAck::Rejected`] so the caller can
/// decide whether to retry. Only requests that never complete return
/// `Err(SearchError::TransportError)`.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Execute one engine-native query against the index.
    ///
    /// The query body is passed through opaquely; the caller encodes any
    /// offset/limit and aggregations in it.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - The engine-native query document
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw engine response body
    /// * `Err(SearchError)` - On transport failure or a non-success status
    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError>;

    /// Submit one index-or-replace request for a single document.
    ///
    /// If a document with the same id already exists, it is replaced.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `doc_id` - The engine document id
    /// * `source` - The serialized document
    ///
    /// # Returns
    ///
    /// * `Ok(WriteAck)` - The completed engine response
    /// * `Err(SearchError)` - If the request never completed
    async fn index_document(
        &self,
        index: &str,
        doc_id: &str,
        source: &Value,
    ) -> Result<WriteAck, SearchError>;

    /// Submit one delete request for a single document.
    ///
    /// A missing document completes with a 404 status and is reported as
    /// [`WriteAck::Rejected`], not as an error.
    async fn delete_document(&self, index: &str, doc_id: &str) -> Result<WriteAck, SearchError>;

    /// Submit one batched request indexing all given documents.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `documents` - `(doc_id, source)` pairs, one sub-request each
    ///
    /// # Returns
    ///
    /// * `Ok(BulkOutcome)` - The aggregate verdict plus the per-item failure
    ///   count
    /// * `Err(SearchError)` - If the request never completed
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[(String, Value)],
    ) -> Result<BulkOutcome, SearchError>;

    /// Submit one batched request deleting all given document ids.
    async fn bulk_delete(&self, index: &str, doc_ids: &[String])
        -> Result<BulkOutcome, SearchError>;

    /// Check if the search engine is reachable and healthy.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine reports a usable cluster state
    /// * `Ok(false)` - If the engine answered but is unhealthy
    /// * `Err(SearchError)` - If the health check could not be executed
    async fn health_check(&self) -> Result<bool, SearchError>;
}
