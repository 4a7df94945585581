use crate::config::ServerConfig;
use crate::lobby::{Lobby, SessionRouter};
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the lobby and the service that feeds it, and spawns the lobby loop.
///
/// The returned handle finishes after [`SignalingService::shutdown`].
pub fn start_lobby(config: &ServerConfig) -> (SignalingService, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.lobby_queue_capacity);
    let signaling = SignalingService::new(cmd_tx);

    let lobby = Lobby::new(
        SessionRouter::new(config.strict_routing),
        cmd_rx,
        Arc::new(signaling.clone()),
    );
    let handle = tokio::spawn(lobby.run());

    (signaling, handle)
}

pub fn build_router(signaling: SignalingService) -> Router {
    // Browser clients are usually served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(signaling)
}
