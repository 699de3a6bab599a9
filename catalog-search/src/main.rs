//! Catalog Search Main Entry Point
//!
//! Wires the search facade from the environment and verifies the engine is
//! reachable. Exits non-zero if the engine cannot be reached or answers
//! unhealthy.

use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_search::{AppError, Dependencies};

/// Initialize tracing/logging.
///
/// `LOG_FORMAT=json` switches to structured JSON output; the default is
/// pretty console output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_search=info,catalog_search_repository=info"));

    let json_logs = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "catalog-search",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting catalog search");

    let deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.service.health_check().await {
        Ok(true) => {
            info!(url = %deps.search_config.url(), "Search engine reachable; catalog search ready");
            Ok(())
        }
        Ok(false) => {
            error!(url = %deps.search_config.url(), "Search engine answered but is not healthy");
            Err(AppError::EngineUnhealthy(deps.search_config.url()))
        }
        Err(e) => {
            error!(error = %e, "Search engine health check failed");
            Err(e.into())
        }
    }
}
