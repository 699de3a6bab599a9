//! Search service implementation.
//!
//! This module provides the main facade for interacting with the search
//! engine. Application code uses this to query, aggregate, upsert, and delete
//! documents.
//!
//! # Note on Document Creation
//!
//! There is no separate `create` function. `save` submits an index-or-replace
//! request keyed by the document's own identifier, so repeated saves with the
//! same id overwrite rather than duplicate (upsert semantics).

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use catalog_search_shared::{Page, SearchDocument};

use crate::config::SearchServiceConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::types::WriteAck;

/// Total attempts for single-document writes and deletes.
///
/// Attempts are made back to back, with no delay between them. Only a
/// completed-but-rejected engine response consumes an attempt; transport
/// errors abort immediately.
const RETRY_LIMIT: u32 = 3;

/// The main facade for interacting with the search engine.
///
/// This is the high-level API application code should use. It validates
/// input, applies the bounded retry policy to single-document writes and
/// deletes, and reshapes raw engine responses into [`Page`] and term-count
/// results. Backend operations are delegated to an injected
/// [`SearchIndexProvider`].
///
/// The service holds no state between calls besides the shared provider
/// handle; all methods take `&self` and may be called concurrently.
///
/// # Example
///
/// ```no_run
/// use catalog_search_repository::{OpenSearchProvider, SearchConfig, SearchService};
/// use catalog_search_shared::Product;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SearchConfig::new("localhost", 9200);
/// let provider = Box::new(OpenSearchProvider::new(&config)?);
/// let service = SearchService::new(provider);
///
/// let product = Product::new(2, "Apple Phone", "phone", 5999.0, "https://img.example.com/2");
/// // Creates the document, or replaces it if id 2 already exists.
/// let stored = service.save(&product, "products").await?;
/// assert!(stored);
/// # Ok(())
/// # }
/// ```
pub struct SearchService {
    provider: Box<dyn SearchIndexProvider>,
    config: SearchServiceConfig,
}

impl SearchService {
    /// Create a new service with default configuration.
    ///
    /// The default configuration limits batch operations to 1000 documents.
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchServiceConfig::default(),
        }
    }

    /// Create a new service with custom configuration.
    pub fn with_config(provider: Box<dyn SearchIndexProvider>, config: SearchServiceConfig) -> Self {
        Self { provider, config }
    }

    /// Check that the caller supplied a usable index name.
    fn validate_index(index: &str) -> Result<(), SearchError> {
        if index.trim().is_empty() {
            return Err(SearchError::validation("index name is required"));
        }
        Ok(())
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Execute an engine-native query and shape the response into a page.
    ///
    /// The query body is forwarded opaquely; the caller is responsible for
    /// encoding offset and limit (`from`/`size`) in it. `page_num` and
    /// `page_size` are echoed into the returned page, and `total` is the
    /// engine-reported count of all matching documents. There is no retry on
    /// reads.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `query` - The engine-native query document
    /// * `page_num` - The requested page number, echoed into the result
    /// * `page_size` - The requested page size, echoed into the result
    ///
    /// # Returns
    ///
    /// * `Ok(Page<T>)` - The shaped page with each hit's source decoded as `T`
    /// * `Err(SearchError)` - On transport failure, a non-success response,
    ///   or an undecodable hit
    pub async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        query: Value,
        page_num: u32,
        page_size: u32,
    ) -> Result<Page<T>, SearchError> {
        Self::validate_index(index)?;

        debug!(index = %index, query = %query, "Executing search");
        let response = self.provider.search(index, &query).await?;

        Self::parse_page(&response, page_num, page_size)
    }

    /// Execute a query embedding one named terms aggregation and return its
    /// buckets as a key-to-count mapping.
    ///
    /// Bucket keys are coerced to integers; integer, float, and
    /// numeric-string JSON forms are all accepted. A missing aggregation name
    /// is a caller defect and is surfaced as
    /// [`SearchError::AggregationNotFound`]; it is never retried.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `query` - The engine-native query document containing the aggregation
    /// * `agg_name` - The name of the terms aggregation to extract
    pub async fn term_aggregation(
        &self,
        index: &str,
        query: Value,
        agg_name: &str,
    ) -> Result<HashMap<i64, u64>, SearchError> {
        Self::validate_index(index)?;

        debug!(index = %index, query = %query, agg_name = %agg_name, "Executing aggregation");
        let response = self.provider.search(index, &query).await?;

        Self::parse_term_buckets(&response, agg_name)
    }

    /// Index a document, replacing any existing document with the same id.
    ///
    /// The document is serialized once and written under the identifier it
    /// reports via [`SearchDocument::document_id`], so repeated saves with
    /// the same id overwrite rather than duplicate.
    ///
    /// Up to [`RETRY_LIMIT`] attempts are made. A completed-but-rejected
    /// engine response is logged (with the payload and the engine's answer)
    /// and retried; exhausting the budget returns `Ok(false)`. A transport
    /// error aborts immediately and is returned as `Err` without consuming
    /// further attempts.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The engine acknowledged the write
    /// * `Ok(false)` - Every attempt completed with a rejected status
    /// * `Err(SearchError)` - The request could not be completed
    pub async fn save<D: SearchDocument>(
        &self,
        document: &D,
        index: &str,
    ) -> Result<bool, SearchError> {
        Self::validate_index(index)?;

        let source = serde_json::to_value(document)
            .map_err(|e| SearchError::serialization(e.to_string()))?;
        let doc_id = document.document_id();

        for attempt in 1..=RETRY_LIMIT {
            match self.provider.index_document(index, &doc_id, &source).await? {
                WriteAck::Created | WriteAck::Ok => return Ok(true),
                WriteAck::Rejected { status, body } => {
                    warn!(
                        index = %index,
                        doc_id = %doc_id,
                        attempt,
                        status,
                        response = %body,
                        payload = %source,
                        "Index request rejected"
                    );
                }
            }
        }

        Ok(false)
    }

    /// Delete a document by its numeric id.
    ///
    /// Same retry structure as [`SearchService::save`]: up to [`RETRY_LIMIT`]
    /// attempts, retrying only completed-but-rejected responses (a missing
    /// document's 404 among them), `Ok(false)` on exhaustion, and immediate
    /// `Err` on transport failure. Success requires an HTTP 200 answer.
    pub async fn delete(&self, id: i64, index: &str) -> Result<bool, SearchError> {
        Self::validate_index(index)?;

        let doc_id = id.to_string();

        for attempt in 1..=RETRY_LIMIT {
            let ack = self.provider.delete_document(index, &doc_id).await?;
            if matches!(ack, WriteAck::Ok) {
                return Ok(true);
            }
            warn!(
                index = %index,
                doc_id = %doc_id,
                attempt,
                ack = ?ack,
                "Delete request not acknowledged"
            );
        }

        Ok(false)
    }

    /// Index a batch of documents in one request.
    ///
    /// Builds a single batched request with one index-or-replace
    /// sub-request per document (same id derivation as
    /// [`SearchService::save`]) and submits it once; there is no per-item
    /// retry. The returned boolean is the top-level status of the batch
    /// response. The engine may report individual sub-operation failures
    /// inside a successful batch; those are logged but do not change the
    /// verdict, so a `true` result is not an atomicity guarantee.
    ///
    /// An empty batch returns `Ok(true)` without contacting the engine. The
    /// batch size is limited by the configured `max_batch_size`.
    pub async fn save_all<D: SearchDocument>(
        &self,
        documents: &[D],
        index: &str,
    ) -> Result<bool, SearchError> {
        Self::validate_index(index)?;

        if documents.is_empty() {
            return Ok(true);
        }
        self.validate_batch_size(documents.len())?;

        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            let source = serde_json::to_value(document)
                .map_err(|e| SearchError::serialization(e.to_string()))?;
            entries.push((document.document_id(), source));
        }

        debug!(index = %index, count = entries.len(), "Submitting bulk index");
        let outcome = self.provider.bulk_index(index, &entries).await?;

        if outcome.has_failures() {
            warn!(
                index = %index,
                failed_items = outcome.failed_items,
                "Bulk index reported item failures"
            );
        }

        Ok(outcome.status_ok)
    }

    /// Delete a batch of documents by numeric id in one request.
    ///
    /// Symmetric to [`SearchService::save_all`]: one batched delete request,
    /// a single top-level verdict, no per-item result surfaced.
    pub async fn delete_all(&self, ids: &[i64], index: &str) -> Result<bool, SearchError> {
        Self::validate_index(index)?;

        if ids.is_empty() {
            return Ok(true);
        }
        self.validate_batch_size(ids.len())?;

        let doc_ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();

        debug!(index = %index, count = doc_ids.len(), "Submitting bulk delete");
        let outcome = self.provider.bulk_delete(index, &doc_ids).await?;

        if outcome.has_failures() {
            warn!(
                index = %index,
                failed_items = outcome.failed_items,
                "Bulk delete reported item failures"
            );
        }

        Ok(outcome.status_ok)
    }

    /// Check if the search engine is reachable and healthy.
    pub async fn health_check(&self) -> Result<bool, SearchError> {
        self.provider.health_check().await
    }

    /// Shape a raw search response into a typed page.
    fn parse_page<T: DeserializeOwned>(
        response: &Value,
        page_num: u32,
        page_size: u32,
    ) -> Result<Page<T>, SearchError> {
        let hits = &response["hits"];

        // Engines report the total either as an object with a value field or,
        // with rest_total_hits_as_int, as a plain number.
        let total = hits["total"]["value"]
            .as_u64()
            .or_else(|| hits["total"].as_u64())
            .unwrap_or(0);

        let mut data = Vec::new();
        if let Some(entries) = hits["hits"].as_array() {
            data.reserve(entries.len());
            for hit in entries {
                let source = hit
                    .get("_source")
                    .ok_or_else(|| SearchError::parse("search hit is missing _source"))?;
                let document: T = serde_json::from_value(source.clone())
                    .map_err(|e| SearchError::parse(format!("failed to decode hit: {}", e)))?;
                data.push(document);
            }
        }

        Ok(Page::new(page_num, page_size, total, data))
    }

    /// Extract the named terms aggregation into a key-to-count mapping.
    fn parse_term_buckets(
        response: &Value,
        agg_name: &str,
    ) -> Result<HashMap<i64, u64>, SearchError> {
        let aggregation = response
            .get("aggregations")
            .and_then(|aggs| aggs.get(agg_name))
            .ok_or_else(|| SearchError::aggregation_not_found(agg_name))?;

        let buckets = aggregation
            .get("buckets")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SearchError::parse(format!("aggregation '{}' has no term buckets", agg_name))
            })?;

        let mut counts = HashMap::with_capacity(buckets.len());
        for bucket in buckets {
            let key = bucket
                .get("key")
                .and_then(Self::bucket_key_as_i64)
                .ok_or_else(|| {
                    SearchError::parse(format!(
                        "aggregation '{}' bucket key is not numeric",
                        agg_name
                    ))
                })?;
            let doc_count = bucket["doc_count"].as_u64().ok_or_else(|| {
                SearchError::parse(format!(
                    "aggregation '{}' bucket is missing doc_count",
                    agg_name
                ))
            })?;
            counts.insert(key, doc_count);
        }

        Ok(counts)
    }

    /// Coerce a bucket key to an integer.
    ///
    /// Terms buckets over numeric fields carry integer or float keys; keyword
    /// fields holding numbers come back as strings.
    fn bucket_key_as_i64(key: &Value) -> Option<i64> {
        key.as_i64()
            .or_else(|| key.as_f64().map(|f| f as i64))
            .or_else(|| key.as_str().and_then(|s| s.parse().ok()))
    }
}
