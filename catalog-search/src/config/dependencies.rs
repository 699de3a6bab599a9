//! Dependency initialization and wiring for the catalog search application.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::repository::ProductRepository;
use catalog_search_repository::{
    OpenSearchProvider, SearchConfig, SearchService, SearchServiceConfig,
};
use catalog_search_shared::Product;

/// Default search engine host.
const DEFAULT_SEARCH_HOST: &str = "localhost";

/// Default search engine port.
const DEFAULT_SEARCH_PORT: u16 = 9200;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The connection configuration the service was built from.
    pub search_config: SearchConfig,
    /// The shared search facade.
    pub service: Arc<SearchService>,
    /// Typed repository over the product index.
    pub products: ProductRepository,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_HOST`: Search engine host (default: localhost)
    /// - `SEARCH_PORT`: Search engine port (default: 9200)
    /// - `PRODUCTS_INDEX`: Product index name (default: "products")
    /// - `MAX_BATCH_SIZE`: Bulk operation size limit (default: 1000)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If client construction fails
    pub fn new() -> Result<Self, AppError> {
        let host = env::var("SEARCH_HOST").unwrap_or_else(|_| DEFAULT_SEARCH_HOST.to_string());
        let port = env::var("SEARCH_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SEARCH_PORT);
        let index = env::var("PRODUCTS_INDEX").unwrap_or_else(|_| Product::INDEX.to_string());
        let service_config = match env::var("MAX_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            Some(max) => SearchServiceConfig::with_max_batch_size(max),
            None => SearchServiceConfig::default(),
        };

        let search_config = SearchConfig::new(host, port);

        info!(
            url = %search_config.url(),
            index = %index,
            max_batch_size = ?service_config.max_batch_size,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(&search_config)
            .map_err(|e| AppError::config(format!("Failed to create search client: {}", e)))?;
        let service = Arc::new(SearchService::with_config(
            Box::new(provider),
            service_config,
        ));
        let products = ProductRepository::new(service.clone(), index);

        Ok(Self {
            search_config,
            service,
            products,
        })
    }
}
