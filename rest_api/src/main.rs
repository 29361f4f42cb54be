use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use graph_client::Neo4jMapStore;
use rest_api::config::load_settings;
use rest_api::{start_server, AppState};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings().context("Failed to load configuration")?;

    let store = Neo4jMapStore::connect(&settings.graph)
        .context("Failed to build the graph connection pool")?;

    // Connections are dialed lazily, so a database that is still starting
    // up only costs us the constraint here; requests heal on their own
    // once it is reachable.
    if let Err(e) = store.ensure_schema().await {
        tracing::warn!(error = %e, "Could not ensure the graph schema at startup");
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port configuration")?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let state = AppState::new(Arc::new(store));
    start_server(addr, state, shutdown_rx).await
}
