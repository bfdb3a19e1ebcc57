use bragboard_api::routes::create_routes;
use bragboard_api::seed::seed_demo_data;
use bragboard_api::{AppConfig, AppState};
use socket2::{Domain, Protocol, Socket, Type};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Binds with `SO_REUSEADDR` so a restart does not wait out sockets in TIME_WAIT.
fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. A listener that failed to install never resolves,
/// so the server keeps running until killed.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging, overridable through RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting BragBoard API server...");

    // Load configuration from environment
    let config = AppConfig::from_env();
    info!("Server configuration loaded");

    // Initialize application state
    let app_state = AppState::new(config.clone()).await?;
    info!("Application state initialized ({} store)", app_state.db.backend_name());

    if let Err(e) = seed_demo_data(&app_state).await {
        error!("❌ STARTUP: Demo data seeding failed: {}. Continuing with the current store.", e);
    }

    let app = create_routes(app_state).layer(CorsLayer::permissive());

    let addr: SocketAddr = config.server_address().parse()?;
    let listener = bind_listener(addr)?;

    info!("Server running on http://{}", config.server_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
