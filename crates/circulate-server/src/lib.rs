//! HTTP server for Circulate.
//!
//! Serves every GET path by dispatching it against the content tree:
//! a matched route answers 200 with the rendered template, anything else
//! answers 404 with the theme's `404` template.
//!
//! # Quick Start
//!
//! ```ignore
//! use circulate_config::Config;
//! use circulate_server::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     run_server(&config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (circulate-server)
//!                        │
//!                        └─► spawn_blocking ──► Dispatcher (circulate-site)
//!                                                  │
//!                                                  ├─► ContentStore scan
//!                                                  ├─► RouteTable lookup
//!                                                  └─► minijinja render
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use circulate_config::Config;
use circulate_site::Dispatcher;

pub use error::ServerError;
use state::AppState;

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or serving fails.
pub async fn run_server(config: &Config) -> Result<(), ServerError> {
    let state = Arc::new(AppState {
        dispatcher: Dispatcher::from_config(config),
    });
    let app = app::create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
