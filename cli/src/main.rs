//! # SoftSell Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `softsell` CLI:
//! 1. Parse command-line args via Clap
//! 2. Configure logging from the verbosity flag (or `RUST_LOG`)
//! 3. Load the layered application config
//! 4. Route to the command handler and report any error
//!
//! ```bash
//! softsell --help
//! softsell -v chat ask "How do I get paid?"
//! softsell --config ./site.toml srv ./out
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

#[derive(Parser, Debug)]
#[command(
    name = "softsell",
    about = "💼 SoftSell: support chat, lead intake and site server",
    long_about = "Answer license-resale questions, validate and submit seller leads,\n\
                  and serve the SoftSell marketing site with its JSON API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Use this config file instead of the user and project files.
    #[arg(long, global = true, env = "SOFTSELL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "l")]
    Lead(commands::lead::LeadArgs),
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = run(cli).await;

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Loads the config and dispatches to the selected command group.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = core::config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
        Commands::Lead(args) => commands::lead::handle_lead(args, &config).await,
        Commands::Srv(args) => commands::srv::handle_srv(args, &config).await,
    }
}
