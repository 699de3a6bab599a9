//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{BulkOutcome, WriteAck};

/// OpenSearch provider implementation.
///
/// Executes single-attempt document and search operations against one engine
/// node. The underlying transport pools connections and is safe to share
/// across concurrent callers.
///
/// # Example
///
/// ```ignore
/// use catalog_search_repository::{OpenSearchProvider, SearchConfig};
///
/// let config = SearchConfig::new("localhost", 9200);
/// let provider = OpenSearchProvider::new(&config)?;
/// let ack = provider.index_document("products", "2", &source).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new provider connected to the configured host and port.
    ///
    /// # Arguments
    ///
    /// * `config` - Host and port of the engine
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchError)` - If connection setup fails
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let url =
            Url::parse(&config.url()).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            host = %config.host,
            port = config.port,
            "Created OpenSearch client"
        );

        Ok(Self { client })
    }

    /// Map a completed response status onto a write acknowledgement.
    fn ack_for_status(status: u16, body: String) -> WriteAck {
        match status {
            201 => WriteAck::Created,
            200 => WriteAck::Ok,
            _ => WriteAck::Rejected { status, body },
        }
    }

    /// Convert a completed write/delete response into a `WriteAck`, reading
    /// the body only for rejected statuses.
    async fn write_ack(response: Response) -> WriteAck {
        let status = response.status_code().as_u16();
        match status {
            200 | 201 => Self::ack_for_status(status, String::new()),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Self::ack_for_status(status, body)
            }
        }
    }

    /// Assemble the action/source line pairs for a bulk index request.
    fn bulk_index_lines(documents: &[(String, Value)]) -> Vec<Value> {
        let mut lines = Vec::with_capacity(documents.len() * 2);
        for (doc_id, source) in documents {
            lines.push(json!({ "index": { "_id": doc_id } }));
            lines.push(source.clone());
        }
        lines
    }

    /// Assemble the action lines for a bulk delete request.
    fn bulk_delete_lines(doc_ids: &[String]) -> Vec<Value> {
        doc_ids
            .iter()
            .map(|doc_id| json!({ "delete": { "_id": doc_id } }))
            .collect()
    }

    /// Count sub-operations the engine reported as failed.
    ///
    /// Each entry in `items` holds a single key named after the sub-operation
    /// (`index`, `delete`, ...) whose value carries an `error` object on
    /// failure.
    fn count_item_failures(response_body: &Value) -> usize {
        if response_body["errors"].as_bool() != Some(true) {
            return 0;
        }
        response_body["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| {
                        item.as_object()
                            .map(|ops| ops.values().any(|op| op.get("error").is_some()))
                            .unwrap_or(false)
                    })
                    .count()
            })
            .unwrap_or(0)
    }

    /// Interpret a completed bulk response.
    async fn bulk_outcome(response: Response) -> Result<BulkOutcome, SearchError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %error_body, "Bulk request returned non-success status");
            return Ok(BulkOutcome {
                status_ok: false,
                failed_items: 0,
            });
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let failed_items = Self::count_item_failures(&response_body);
        if failed_items > 0 {
            warn!(failed_items, "Bulk request completed with item failures");
        }

        Ok(BulkOutcome {
            status_ok: true,
            failed_items,
        })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn search(&self, index: &str, body: &Value) -> Result<Value, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::search_failed(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    async fn index_document(
        &self,
        index: &str,
        doc_id: &str,
        source: &Value,
    ) -> Result<WriteAck, SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, doc_id))
            .body(source)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        Ok(Self::write_ack(response).await)
    }

    async fn delete_document(&self, index: &str, doc_id: &str) -> Result<WriteAck, SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, doc_id))
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        Ok(Self::write_ack(response).await)
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[(String, Value)],
    ) -> Result<BulkOutcome, SearchError> {
        let body: Vec<JsonBody<Value>> = Self::bulk_index_lines(documents)
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        Self::bulk_outcome(response).await
    }

    async fn bulk_delete(
        &self,
        index: &str,
        doc_ids: &[String],
    ) -> Result<BulkOutcome, SearchError> {
        let body: Vec<JsonBody<Value>> = Self::bulk_delete_lines(doc_ids)
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        Self::bulk_outcome(response).await
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::transport(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health["status"].as_str().unwrap_or("unknown");

        Ok(status == "green" || status == "yellow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_for_status() {
        assert_eq!(
            OpenSearchProvider::ack_for_status(201, String::new()),
            WriteAck::Created
        );
        assert_eq!(
            OpenSearchProvider::ack_for_status(200, String::new()),
            WriteAck::Ok
        );
        assert_eq!(
            OpenSearchProvider::ack_for_status(429, "busy".to_string()),
            WriteAck::Rejected {
                status: 429,
                body: "busy".to_string()
            }
        );
    }

    #[test]
    fn test_bulk_index_lines() {
        let documents = vec![
            ("1".to_string(), json!({ "id": 1, "title": "a" })),
            ("2".to_string(), json!({ "id": 2, "title": "b" })),
        ];

        let lines = OpenSearchProvider::bulk_index_lines(&documents);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], json!({ "index": { "_id": "1" } }));
        assert_eq!(lines[1], json!({ "id": 1, "title": "a" }));
        assert_eq!(lines[2], json!({ "index": { "_id": "2" } }));
        assert_eq!(lines[3], json!({ "id": 2, "title": "b" }));
    }

    #[test]
    fn test_bulk_delete_lines() {
        let doc_ids = vec!["7".to_string(), "8".to_string()];

        let lines = OpenSearchProvider::bulk_delete_lines(&doc_ids);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], json!({ "delete": { "_id": "7" } }));
        assert_eq!(lines[1], json!({ "delete": { "_id": "8" } }));
    }

    #[test]
    fn test_count_item_failures() {
        let response_body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 429, "error": { "type": "circuit_breaking_exception" } } },
                { "delete": { "_id": "3", "status": 500, "error": { "type": "internal" } } }
            ]
        });

        assert_eq!(OpenSearchProvider::count_item_failures(&response_body), 2);
    }

    #[test]
    fn test_count_item_failures_none() {
        let response_body = json!({
            "errors": false,
            "items": [
                { "index": { "_id": "1", "status": 200 } }
            ]
        });

        assert_eq!(OpenSearchProvider::count_item_failures(&response_body), 0);
    }

    #[test]
    fn test_count_item_failures_missing_fields() {
        assert_eq!(OpenSearchProvider::count_item_failures(&json!({})), 0);
        assert_eq!(
            OpenSearchProvider::count_item_failures(&json!({ "errors": true })),
            0
        );
    }
}
