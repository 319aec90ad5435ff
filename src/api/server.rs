use std::net::SocketAddr;

use axum::{Router, extract::DefaultBodyLimit, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::{
    services::{field, health, metrics, render, resolve, template},
    state::AppState,
};
use crate::config::Config;
use crate::dispatch::MediaDispatcher;
use crate::filters::TransformerSet;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the API router over `state`
pub fn router(state: AppState) -> Router {
    let max_payload = state.config.server.api.max_payload_bytes.as_usize();

    Router::new()
        .route("/media/resolve", post(resolve))
        .route("/media/render", post(render))
        .route("/media/field", post(field))
        .route("/templates/{alias}", get(template))
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_payload))
        .layer(RequestDecompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config, address: SocketAddr) -> Result<(), AnyError> {
    let dispatcher = MediaDispatcher::from_config(&config, &TransformerSet::with_defaults())?;
    let app = router(AppState::new(config, dispatcher));

    let listener = TcpListener::bind(address).await?;
    info!(%address, "mediabox API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(%err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
