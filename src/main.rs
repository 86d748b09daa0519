// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use workflow_dashboards::application::dashboard_service::DashboardService;
use workflow_dashboards::application::dashboard_store::DashboardStore;
use workflow_dashboards::application::key_value_store::KeyValueStore;
use workflow_dashboards::application::metadata_hydrator::MetadataHydrator;
use workflow_dashboards::infrastructure::config::{load_app_config, StoreBackend};
use workflow_dashboards::infrastructure::execution_client::ExecutionClient;
use workflow_dashboards::infrastructure::file_store::FileStore;
use workflow_dashboards::infrastructure::memory_store::MemoryStore;
use workflow_dashboards::presentation::app_state::AppState;
use workflow_dashboards::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_app_config()?;

    // Local storage (infrastructure layer)
    let local_store: Arc<dyn KeyValueStore> = match config.store.backend {
        StoreBackend::File => {
            tracing::info!("Using file store at {}", config.store.path);
            Arc::new(FileStore::new(&config.store.path))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; dashboards are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let executions = Arc::new(ExecutionClient::new(
        config.execution.base_url.clone(),
        config.execution.token.clone(),
        Duration::from_secs(config.execution.timeout_secs),
    )?);

    // Create services (application layer)
    let store = DashboardStore::new(local_store, config.store.key.clone());
    let hydrator = MetadataHydrator::new(executions);
    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(store, hydrator),
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting dashboard service on {} (executions from {})",
        addr,
        config.execution.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
