//! Box-office catalog service binary.
//!
//! Wires together configuration, logging, the dataset loader, and the
//! catalog API server.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `boxoffice-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Load and index the movie dataset; any failure is fatal
//! 4. Load the root page
//! 5. Bind the listener and serve until `Ctrl-C`

mod config;
mod error;

use std::sync::Arc;

use boxoffice_index::load_catalog;
use boxoffice_server::page::load_root_page;
use boxoffice_server::{AppState, ServerConfig, start_server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSection, ServiceConfig};
use crate::error::ServiceError;

/// Application entry point for the catalog service.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the dataset cannot be
/// loaded, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so failures here are
    //    reported through the returned error only.
    let config_path = config::config_path();
    let config = config::load_config(&config_path).map_err(ServiceError::from)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("boxoffice-service starting");
    info!(
        path = %config_path.display(),
        found = config_path.exists(),
        data_file = %config.dataset.path.display(),
        port = config.server.port,
        log_format = %config.logging.format,
        "Configuration loaded"
    );

    run(config).await.map_err(|e| {
        error!(error = %e, "boxoffice-service failed");
        Box::new(e) as Box<dyn std::error::Error>
    })
}

/// Load the catalog and serve it until shutdown.
async fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    // 3. Load and index the dataset.
    let catalog = load_catalog(&config.dataset.path)?;

    // 4. Root page.
    let root_page = load_root_page(&config.pages.root);

    // 5. Serve.
    let state = Arc::new(AppState::new(catalog).with_root_page(root_page));
    let server_config = ServerConfig::from(&config.server);
    start_server(&server_config, state).await?;

    info!("boxoffice-service stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
