//! HTTP surface of the zodiac ephemeris: JSON API and server-rendered page.

mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use zodiac_chart::Ephemeris;
use zodiac_config::ServerConfig;

pub use error::ApiError;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ephemeris: Ephemeris,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(ephemeris: Ephemeris, config: ServerConfig) -> Self {
        Self {
            ephemeris,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page))
        .route("/api/ephemeris", get(handlers::ephemeris))
        .route("/api/calculate/{body_id}", get(handlers::calculate))
        .route("/api/bodies", get(handlers::bodies))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "ephemeris service listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("ephemeris service stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            error!(error = %err, "could not listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
