//! # SoftSell Site Server
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! `softsell srv` serves the built marketing site and the JSON API behind its
//! chat widget and lead form.
//!
//! - `config.rs`: server settings from flags and `.softsell-srv.toml`
//! - `api.rs`: `POST /api/chat` and `POST /api/leads`
//! - `server_logic.rs`: router, port fallback, graceful shutdown
//! - `utils.rs`: startup checks
//!
//! ```bash
//! # Serve ./out on port 8000 (or the next free port)
//! softsell srv ./out
//!
//! # Listen on all interfaces without CORS headers
//! softsell srv --host 0.0.0.0 --port 9000 --no-cors ./out
//! ```
//!
//! Chat rules and the lead sink come from the application config, not from
//! `.softsell-srv.toml`.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use tracing::info;

pub use config::SrvArgs;

pub mod api;
pub mod config;
pub mod server_logic;
pub mod utils;

/// Entry point for `softsell srv`.
pub async fn handle_srv(args: SrvArgs, app_config: &Config) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let server_config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", server_config);

    let state = api::AppState::from_config(app_config)?;
    info!(
        rules = state.responder.rules().len(),
        sink = ?app_config.lead.sink,
        "Site API ready"
    );

    server_logic::run_server(server_config, state).await
}
