use holical::bootstrap;
use holical::config::Config;
use holical::infrastructure::http::router::build_router_with_timeout;
use holical::infrastructure::observability;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing and metrics
    let _guard = observability::init(&config).map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded");

    // Build application state
    let state = bootstrap::build_app_state(&config)?;
    bootstrap::start_rate_limit_cleanup(state.rate_limiter.clone());

    // Build router
    let app = build_router_with_timeout(state, config.request_timeout);

    // Start server
    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
