//! Payments web server - verifies payment confirmations and webhooks.
//!
//! This binary hosts the payment trust boundary:
//! - Receives client payment confirmations and Razorpay webhooks
//! - Verifies HMAC-SHA256 signatures before any side effect
//! - Acknowledges verified webhooks immediately

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use payments::{router, AppState, Config, EventDispatcher, LogRecorder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("payments_web_starting");

    // Load configuration once; secrets are immutable for the process lifetime
    let config = Config::from_env();
    info!(
        port = config.port,
        confirmation_secrets = config.confirmation_secrets.len(),
        webhook_secrets = config.webhook_secrets.len(),
        "config_loaded"
    );

    // Create application state
    let dispatcher = EventDispatcher::new(Arc::new(LogRecorder));
    let state = AppState::new(config.clone(), dispatcher);

    // Build the router
    let app = router(state).layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "payments_web_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("payments_web_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("payments_web_shutting_down");
}
