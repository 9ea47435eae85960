//! # SoftSell Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level command groups of the `softsell` CLI. Each group defines an
//! `XArgs` struct for clap and a `handle_x` function that `main.rs` dispatches to.
//!
//! - `chat`: ask the support chat, run a session, list its rules
//! - `lead`: validate or submit "sell your license" leads
//! - `srv`: serve the site together with its JSON API
//!

/// Support chat commands: `ask`, `session`, `rules`.
pub mod chat;
/// Lead form commands: `check`, `submit`.
pub mod lead;
/// Site and API server.
pub mod srv;
