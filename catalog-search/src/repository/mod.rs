//! Typed repository over the product index.

mod product_repository;

pub use product_repository::ProductRepository;
