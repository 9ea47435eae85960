//! # SoftSell Site Server
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Runs the axum server behind `softsell srv`:
//! - `/api/*` routes from `api.rs`
//! - everything else served from the site directory by `ServeDir`
//! - port fallback when the requested port is taken
//! - graceful shutdown on Ctrl+C or SIGTERM
//!
//! ```rust
//! let server_config = config::load_and_merge_config(args).await?;
//! let state = api::AppState::from_config(&app_config)?;
//! server_logic::run_server(server_config, state).await?;
//! ```
//!
use super::api::{api_router, AppState};
use super::config::ServerConfig;
use super::utils;
use crate::core::error::Result;
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run Site Server (`run_server`)
///
/// Starts the axum server for the site and its API.
///
/// ## Process:
/// 1. Finds a free port, starting at `config.port` (see `find_available_port`).
/// 2. Checks the site directory and detects a LAN address for the banner.
/// 3. Builds the router with `create_app`: `/api` routes first, static files
///    as the fallback.
/// 4. Prints the banner, binds the listener and serves until Ctrl+C or SIGTERM.
///
/// ## Arguments
///
/// * `config`: Merged server settings. `directory` is already canonical.
/// * `state`: Responder and intake sink shared by the API handlers.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after a graceful shutdown.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - No port is free within `MAX_PORT_ATTEMPTS` tries.
/// - Binding the listener fails (for example, because of permissions).
/// - The server itself fails while running.
pub async fn run_server(config: ServerConfig, state: AppState) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;

    utils::check_site_directory(&config.directory);
    let local_ip = utils::get_local_ip();
    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("📂 Serving site from: {}", config.directory.display());
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    if local_ip != "localhost" && !utils::is_local_only(config.host) {
        println!("🔗 Network URL:       http://{}:{}", local_ip, addr.port());
    }
    println!("💬 Chat API:          POST /api/chat");
    println!("📨 Lead API:          POST /api/leads");
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!(
        "Starting server on {} for directory {}",
        addr,
        config.directory.display()
    );
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
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
}

/// Tries `start_port`, then the following ports, up to `max_attempts` in total.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, using port {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable ({}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// API routes first, static files as the fallback, then tracing and CORS.
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    api_router(state)
        .fallback_service(ServeDir::new(&config.directory))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}
