//! Product repository implementation.
//!
//! Builds the engine-native query bodies for the product index and delegates
//! execution to the search facade. Offset and limit are encoded into the
//! query body here, on the calling side.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use catalog_search_repository::{SearchError, SearchService};
use catalog_search_shared::{Page, Product};

/// Name of the terms aggregation used by [`ProductRepository::price_distribution`].
const PRICE_AGG: &str = "price_counts";

/// Typed repository over the product index.
///
/// Thin wrapper around the shared [`SearchService`], bound to one index name.
/// Safe to share across concurrent callers.
pub struct ProductRepository {
    service: Arc<SearchService>,
    index: String,
}

impl ProductRepository {
    /// Create a repository bound to the given index.
    pub fn new(service: Arc<SearchService>, index: impl Into<String>) -> Self {
        Self {
            service,
            index: index.into(),
        }
    }

    /// The index this repository operates on.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Save a product, replacing any existing document with the same id.
    pub async fn save(&self, product: &Product) -> Result<bool, SearchError> {
        self.service.save(product, &self.index).await
    }

    /// Save a batch of products in one bulk request.
    pub async fn save_all(&self, products: &[Product]) -> Result<bool, SearchError> {
        self.service.save_all(products, &self.index).await
    }

    /// Delete a product by id.
    pub async fn delete(&self, id: i64) -> Result<bool, SearchError> {
        self.service.delete(id, &self.index).await
    }

    /// Delete a batch of products by id in one bulk request.
    pub async fn delete_all(&self, ids: &[i64]) -> Result<bool, SearchError> {
        self.service.delete_all(ids, &self.index).await
    }

    /// Look up a single product by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, SearchError> {
        let page = self
            .service
            .search::<Product>(&self.index, Self::find_by_id_query(id), 0, 1)
            .await?;
        Ok(page.data.into_iter().next())
    }

    /// List products, newest id first.
    pub async fn find_all(
        &self,
        page_num: u32,
        page_size: u32,
    ) -> Result<Page<Product>, SearchError> {
        self.service
            .search(
                &self.index,
                Self::find_all_query(page_num, page_size),
                page_num,
                page_size,
            )
            .await
    }

    /// Search products whose title matches the given term.
    pub async fn search_by_title(
        &self,
        title: &str,
        page_num: u32,
        page_size: u32,
    ) -> Result<Page<Product>, SearchError> {
        self.service
            .search(
                &self.index,
                Self::title_query(title, page_num, page_size),
                page_num,
                page_size,
            )
            .await
    }

    /// Count products per distinct price point.
    pub async fn price_distribution(&self) -> Result<HashMap<i64, u64>, SearchError> {
        self.service
            .term_aggregation(&self.index, Self::price_distribution_query(), PRICE_AGG)
            .await
    }

    fn find_by_id_query(id: i64) -> Value {
        json!({
            "query": { "term": { "id": id } },
            "from": 0,
            "size": 1
        })
    }

    fn find_all_query(page_num: u32, page_size: u32) -> Value {
        json!({
            "query": { "match_all": {} },
            "sort": [ { "id": { "order": "desc" } } ],
            "from": Self::offset(page_num, page_size),
            "size": page_size
        })
    }

    fn title_query(title: &str, page_num: u32, page_size: u32) -> Value {
        json!({
            "query": { "term": { "title": title } },
            "from": Self::offset(page_num, page_size),
            "size": page_size
        })
    }

    fn price_distribution_query() -> Value {
        json!({
            "size": 0,
            "aggs": { PRICE_AGG: { "terms": { "field": "price" } } }
        })
    }

    fn offset(page_num: u32, page_size: u32) -> u64 {
        u64::from(page_num) * u64::from(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id_query() {
        let query = ProductRepository::find_by_id_query(2);
        assert_eq!(query["query"]["term"]["id"].as_i64(), Some(2));
        assert_eq!(query["size"].as_u64(), Some(1));
    }

    #[test]
    fn test_find_all_query_encodes_offset() {
        let query = ProductRepository::find_all_query(2, 5);
        assert_eq!(query["from"].as_u64(), Some(10));
        assert_eq!(query["size"].as_u64(), Some(5));
        assert_eq!(query["sort"][0]["id"]["order"].as_str(), Some("desc"));
    }

    #[test]
    fn test_title_query() {
        let query = ProductRepository::title_query("phone", 0, 20);
        assert_eq!(query["query"]["term"]["title"].as_str(), Some("phone"));
        assert_eq!(query["from"].as_u64(), Some(0));
        assert_eq!(query["size"].as_u64(), Some(20));
    }

    #[test]
    fn test_price_distribution_query() {
        let query = ProductRepository::price_distribution_query();
        assert_eq!(query["size"].as_u64(), Some(0));
        assert_eq!(
            query["aggs"][PRICE_AGG]["terms"]["field"].as_str(),
            Some("price")
        );
    }
}
