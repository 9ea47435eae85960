//! # SoftSell Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for SoftSell, handling loading,
//! merging, validation, and access to configuration data. Settings cover the chat
//! widget (welcome text, typing delay, support address, extra keyword rules) and the
//! lead form (which intake collaborator receives validated leads).
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or `SOFTSELL_CONFIG`); when given,
//!    discovery is skipped entirely
//! 2. Project-specific `.softsell.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! typing_delay_ms = 600
//! support_email = "help@example.com"
//!
//! [[chat.rules]]
//! pattern = "refund"
//! response = "Refunds are handled case by case. Send us your order number."
//!
//! [lead]
//! sink = "outbox"
//! outbox_dir = "~/softsell/outbox"
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let responder = Responder::from_config(&cfg.chat);
//! ```
//!
use crate::core::error::{Result, SoftsellError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub lead: LeadConfig,
}

/// Settings for the chat widget (`softsell chat ...` and `POST /api/chat`).
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Delay before the bot reply is shown, in milliseconds.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    /// First bot message of every session.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    /// Address quoted by the default fallback reply.
    #[serde(default = "default_support_email")]
    pub support_email: String,
    /// Extra keyword rules, consulted after the built-in ones.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One configured keyword rule.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub pattern: String,
    pub response: String,
}

/// Where validated leads are handed off.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Record the lead in the log only.
    #[default]
    Log,
    /// Drop each lead as a JSON file into `outbox_dir`.
    Outbox,
}

/// Settings for the lead form (`softsell lead ...` and `POST /api/leads`).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct LeadConfig {
    #[serde(default)]
    pub sink: SinkKind,
    /// Outbox directory (can use ~). Required when `sink = "outbox"`.
    pub outbox_dir: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            welcome_message: default_welcome_message(),
            support_email: default_support_email(),
            rules: Vec::new(),
        }
    }
}

fn default_typing_delay_ms() -> u64 {
    1000
}
fn default_welcome_message() -> String {
    "Hi there! How can I help you with selling your software licenses today?".to_string()
}
fn default_support_email() -> String {
    "support@softsell.com".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".softsell.toml";

/// # Load Configuration (`load_config`)
///
/// Loads, merges, expands and validates the effective configuration.
///
/// ## Process:
/// 1. With `explicit` set, reads only that file, which must exist. Otherwise
///    reads the user `config.toml` and the nearest `.softsell.toml` and merges
///    them over the defaults. A project value wins when it differs from the
///    default.
/// 2. Expands `~` in `lead.outbox_dir`.
/// 3. Validates the result (see `validate_config`).
///
/// ## Arguments
///
/// * `explicit`: File from `--config` or `SOFTSELL_CONFIG`, if given.
///
/// ## Returns
///
/// * `Result<Config>`: The configuration every command runs with.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - A config file cannot be read, or is not valid TOML.
/// - A file contains an unknown key.
/// - Validation fails: blank support email or welcome message, an empty rule
///   pattern or response, or an outbox sink with no usable directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut merged_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "SoftSell", "softsell") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.softsell.toml) found in {} or ancestors.", start.display());
        Ok(None)
    }
}

/// Walks up from `start` looking for `.softsell.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => return None,
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.chat.typing_delay_ms = if project_cfg.chat.typing_delay_ms != default_typing_delay_ms() {
        project_cfg.chat.typing_delay_ms
    } else {
        user.chat.typing_delay_ms
    };
    merged.chat.welcome_message = if project_cfg.chat.welcome_message != default_welcome_message() {
        project_cfg.chat.welcome_message
    } else {
        user.chat.welcome_message
    };
    merged.chat.support_email = if project_cfg.chat.support_email != default_support_email() {
        project_cfg.chat.support_email
    } else {
        user.chat.support_email
    };
    merged.chat.rules = if !project_cfg.chat.rules.is_empty() {
        project_cfg.chat.rules
    } else {
        user.chat.rules
    };
    merged.lead.sink = if project_cfg.lead.sink != SinkKind::default() {
        project_cfg.lead.sink
    } else {
        user.lead.sink
    };
    merged.lead.outbox_dir = project_cfg.lead.outbox_dir.or(user.lead.outbox_dir);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(dir) = config.lead.outbox_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded outbox directory: {}", dir);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.chat.support_email.trim().is_empty() {
        return Err(anyhow!(SoftsellError::Config(
            "chat.support_email cannot be empty.".to_string()
        )));
    }
    if config.chat.welcome_message.trim().is_empty() {
        return Err(anyhow!(SoftsellError::Config(
            "chat.welcome_message cannot be empty.".to_string()
        )));
    }
    for (index, rule) in config.chat.rules.iter().enumerate() {
        // An empty pattern is a substring of every query and would shadow all later rules.
        if rule.pattern.trim().is_empty() {
            return Err(anyhow!(SoftsellError::Config(format!(
                "Chat rule #{} has an empty pattern.",
                index + 1
            ))));
        }
        if rule.response.trim().is_empty() {
            return Err(anyhow!(SoftsellError::Config(format!(
                "Chat rule '{}' has an empty response.",
                rule.pattern
            ))));
        }
    }
    match (config.lead.sink, config.lead.outbox_dir.as_deref()) {
        (SinkKind::Outbox, None) => {
            return Err(anyhow!(SoftsellError::Config(
                "lead.outbox_dir is required when lead.sink = \"outbox\".".to_string()
            )));
        }
        (SinkKind::Outbox, Some(dir)) => {
            let dir = Path::new(dir);
            if dir.exists() && !dir.is_dir() {
                return Err(anyhow!(SoftsellError::Config(format!(
                    "Configured outbox path '{}' exists but is not a directory.",
                    dir.display()
                ))));
            }
        }
        (SinkKind::Log, Some(_)) => {
            warn!("lead.outbox_dir is set but lead.sink is \"log\"; the directory is ignored.");
        }
        (SinkKind::Log, None) => {}
    }
    info!("Configuration validation successful.");
    Ok(())
}
