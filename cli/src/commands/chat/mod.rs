//! # SoftSell Chat Command Group
//!
//! File: cli/src/commands/chat/mod.rs
//!
//! ## Overview
//!
//! Terminal front end for the support chat widget:
//!
//! ```bash
//! # One question, one answer
//! softsell chat ask "How do I get paid?"
//!
//! # Interactive conversation with the typing delay
//! softsell chat session
//!
//! # Show the keyword knowledge base in precedence order
//! softsell chat rules
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Implements `softsell chat ask`.
mod ask;
/// Implements `softsell chat rules`.
mod rules;
/// Implements `softsell chat session`.
mod session;

#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(subcommand)]
    command: ChatCommand,
}

#[derive(Subcommand, Debug)]
enum ChatCommand {
    /// Answer a single question and exit.
    Ask(ask::AskArgs),
    /// Start an interactive chat on stdin/stdout.
    Session(session::SessionArgs),
    /// List the keyword rules in the order they are tried.
    Rules(rules::RulesArgs),
}

/// Dispatches `softsell chat <subcommand>`.
pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    match args.command {
        ChatCommand::Ask(args) => ask::handle_ask(args, config)?,
        ChatCommand::Session(args) => session::handle_session(args, config).await?,
        ChatCommand::Rules(args) => rules::handle_rules(args, config)?,
    }
    Ok(())
}
