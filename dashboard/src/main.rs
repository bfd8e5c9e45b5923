use anyhow::Result;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::client::ApiClient;
use common::config::Settings;
use common::poller::ExecutionsCache;
use dashboard::routes;
use dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info,common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!("Starting dashboard server");

    // Load configuration
    let config = Settings::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        backend = %config.backend.api_url,
        "Configuration loaded"
    );

    // Initialize backend API client
    let client = ApiClient::new(
        &config.backend.api_url,
        config.backend.request_timeout_seconds,
    )?;

    // Start the executions poll loop
    let executions = ExecutionsCache::new(client.clone());
    let poll_handle = executions.spawn_poll_loop(config.poll.interval_seconds);
    tracing::info!(
        interval_seconds = config.poll.interval_seconds,
        "Executions poll loop started"
    );

    // Initialize Prometheus metrics exporter
    let metrics_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    tracing::info!("Metrics exporter initialized");

    // Create application state
    let state = AppState::new(client, executions.clone(), metrics_handle, config.clone());

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    executions.shutdown();
    let _ = poll_handle.await;

    tracing::info!("Dashboard server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
