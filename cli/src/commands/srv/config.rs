//! # SoftSell Site Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! Settings for `softsell srv`, combined from:
//! 1. Command-line arguments (highest priority, when they differ from their defaults)
//! 2. `.softsell-srv.toml` inside the served directory (if present)
//! 3. Default values (lowest priority)
//!
//! ```toml
//! port = 9000
//! host = "0.0.0.0"
//! directory = "out"     # relative to this file
//! enable_cors = false
//! ```
//!
//! The resolved directory is always absolute and must exist.
//!
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::net::IpAddr;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The expected name for the server-specific configuration file.
const CONFIG_FILE_NAME: &str = ".softsell-srv.toml";

/// Command-line arguments for `softsell srv`.
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Directory holding the built site (index.html and assets).
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Interface to bind. Use 0.0.0.0 to accept connections from the network.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Do not send permissive CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective server settings after merging.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    /// Absolute, canonical path of the served directory.
    pub directory: PathBuf,
    pub enable_cors: bool,
}

/// Raw contents of `.softsell-srv.toml`; every key optional.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    host: Option<String>,
    directory: Option<String>,
    enable_cors: Option<bool>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            directory: PathBuf::from("."),
            enable_cors: true,
        }
    }
}

/// Merges arguments, the optional file in the served directory, and defaults.
pub async fn load_and_merge_config(args: SrvArgs) -> Result<ServerConfig> {
    let mut effective_config = ServerConfig::from_args(&args);
    let cli_defaults = SrvArgs::parse_from([""]);

    let config_search_dir = if args.directory.is_absolute() {
        args.directory.clone()
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(&args.directory)
    };
    debug!("Looking for config file in: {}", config_search_dir.display());

    if let Some(file_config) = load_config_from_dir(&config_search_dir)? {
        info!(
            "Loaded settings from {}",
            config_search_dir.join(CONFIG_FILE_NAME).display()
        );
        if args.port == cli_defaults.port {
            effective_config.port = file_config.port;
        }
        if args.host == cli_defaults.host {
            effective_config.host = file_config.host;
        }
        if !args.no_cors {
            effective_config.enable_cors = file_config.enable_cors;
        }
        effective_config.directory = file_config.directory;
    } else {
        debug!("No config file found. Using arguments.");
    }

    effective_config.resolve_directory().await?;
    Ok(effective_config)
}

/// Reads `.softsell-srv.toml` from `search_dir`, if present.
///
/// A relative `directory` in the file is resolved against the file's location.
fn load_config_from_dir(search_dir: &Path) -> Result<Option<ServerConfig>> {
    let config_path = search_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        debug!("No config file found at {}", config_path.display());
        return Ok(None);
    }

    info!("Loading configuration from {}", config_path.display());
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let file_config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    let defaults = ServerConfig::default();
    let host = match file_config.host {
        Some(ref host_str) => host_str.parse().unwrap_or_else(|e| {
            warn!(
                "Invalid host IP '{}' in config file ({}), using default {}",
                host_str, e, defaults.host
            );
            defaults.host
        }),
        None => defaults.host,
    };

    let directory = PathBuf::from(file_config.directory.as_deref().unwrap_or("."));
    let directory = if directory.is_relative() {
        search_dir.join(directory)
    } else {
        directory
    };

    Ok(Some(ServerConfig {
        port: file_config.port.unwrap_or(defaults.port),
        host,
        directory,
        enable_cors: file_config.enable_cors.unwrap_or(defaults.enable_cors),
    }))
}

impl ServerConfig {
    fn from_args(args: &SrvArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            directory: args.directory.clone(),
            enable_cors: !args.no_cors,
        }
    }

    /// Makes `directory` absolute and canonical, and checks it is a directory.
    async fn resolve_directory(&mut self) -> Result<()> {
        let absolute_path = if self.directory.is_absolute() {
            self.directory.clone()
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(&self.directory)
        };

        let canonical_path = tokio::fs::canonicalize(&absolute_path)
            .await
            .with_context(|| {
                format!(
                    "Directory '{}' could not be found or accessed",
                    absolute_path.display()
                )
            })?;
        let metadata = tokio::fs::metadata(&canonical_path)
            .await
            .with_context(|| format!("Failed to get metadata for '{}'", canonical_path.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Path is not a directory: {}", canonical_path.display());
        }

        self.directory = canonical_path;
        debug!("Resolved site directory to: {}", self.directory.display());
        Ok(())
    }
}
