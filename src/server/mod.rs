// src/server/mod.rs
//! HTTP boundary: `POST /generate` and friends.

mod routes;

use crate::constants::MAX_REQUEST_BODY_BYTES;
use crate::error::AppError;
use crate::pipeline::HypePipeline;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: HypePipeline,
}

impl AppState {
    pub fn new(pipeline: HypePipeline) -> Self {
        Self { pipeline }
    }
}

pub type AppStateArc = Arc<AppState>;

/// Builds the router with every route and layer attached.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::generate_routes())
        .merge(routes::health_routes())
        .fallback(routes::not_found)
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
}

/// Binds and serves until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), AppError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
