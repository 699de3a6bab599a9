//! Configuration types for the search engine connection and the service.

/// Connection settings for the search engine.
///
/// A single host and port configuring one HTTP client. Authentication, TLS,
/// and cluster topology are out of scope.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Host name of the search engine.
    pub host: String,
    /// HTTP port of the search engine.
    pub port: u16,
}

impl SearchConfig {
    /// Create a new connection configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The engine base URL derived from host and port.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
        }
    }
}

/// Configuration for the `SearchService`.
///
/// Controls batch operation limits to prevent accidentally sending overly
/// large bulk requests to the engine.
#[derive(Debug, Clone)]
pub struct SearchServiceConfig {
    /// Maximum number of documents allowed in a single batch operation.
    ///
    /// Set to `None` to disable the limit. Defaults to 1000.
    pub max_batch_size: Option<usize>,
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
        }
    }
}

impl SearchServiceConfig {
    /// Create a config with no batch size limit.
    ///
    /// # Warning
    ///
    /// Unbounded batches can hit engine request-size limits and timeouts.
    /// Not recommended for production.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let config = SearchConfig::new("search.internal", 9201);
        assert_eq!(config.url(), "http://search.internal:9201");
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.url(), "http://localhost:9200");
    }

    #[test]
    fn test_service_config_defaults() {
        assert_eq!(SearchServiceConfig::default().max_batch_size, Some(1000));
        assert_eq!(SearchServiceConfig::unlimited().max_batch_size, None);
        assert_eq!(
            SearchServiceConfig::with_max_batch_size(50).max_batch_size,
            Some(50)
        );
    }
}
