//! Bugtrack Server - REST API for tracking bugs
//!
//! Exposes filtered CRUD on bug records plus account registration and token
//! issuance, backed by SQLite.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use bugtrack_server::{create_router_with_config, db, AppState, Config};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bugtrack_server=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    let pool = db::connect(
        &config.database_url,
        config.database_max_connections,
        config.database_min_connections,
    )
    .await
    .expect("Failed to open database");

    // Tokens must never be signed with a published constant, so there is no
    // fallback secret.
    let jwt_secret = config.jwt_secret.clone().expect("JWT_SECRET must be set");

    let state = AppState::new(pool, jwt_secret.as_bytes(), config.require_auth);
    let app = create_router_with_config(state, &config);

    let addr = config.socket_addr();
    tracing::info!(
        %addr,
        require_auth = config.require_auth,
        database_url = %config.database_url,
        "bugtrack-server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    // Rate limiting keys on the peer IP, which requires connect info on the
    // serve path.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Resolves when Ctrl-C is received
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    tracing::info!("Shutdown signal received, draining connections");
}
