//! # Catalog Search Shared
//!
//! This crate defines shared data structures and types used across the catalog
//! search system. It includes the document identifier trait, the paginated
//! result shape, and the `Product` catalog entity.

pub mod types;

pub use types::document::SearchDocument;
pub use types::page::Page;
pub use types::product::Product;
