//! Product catalog entity.
//!
//! This module defines the document structure that is indexed in the search
//! engine for the product catalog.

use serde::{Deserialize, Serialize};

use crate::types::document::SearchDocument;

/// A product as it is stored in the search engine.
///
/// # Fields
///
/// - `id`: Unique numeric identifier, also used as the engine document id
/// - `title`: Product title (primary search field)
/// - `category`: Product category
/// - `price`: Unit price
/// - `images`: Image URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub images: String,
}

impl Product {
    /// Default index name for product documents.
    pub const INDEX: &'static str = "products";

    /// Create a new product.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        images: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: category.into(),
            price,
            images: images.into(),
        }
    }
}

impl SearchDocument for Product {
    fn document_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id() {
        let product = Product::new(2, "Apple Phone", "phone", 5999.0, "https://img.example.com/2");
        assert_eq!(product.document_id(), "2");
    }

    #[test]
    fn test_serialization_carries_id() {
        let product = Product::new(42, "Mi Phone", "phone", 2999.0, "https://img.example.com/42");

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"].as_i64(), Some(42));
        assert_eq!(value["title"].as_str(), Some("Mi Phone"));

        let deserialized: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product, deserialized);
    }

    #[test]
    fn test_index_name() {
        assert_eq!(Product::INDEX, "products");
    }
}
