//! # SoftSell CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command is
//! pointed at an explicit config file so a developer's own user or project
//! config never leaks into a test run.
//!

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// `softsell` binary built for this test run.
pub fn softsell_cmd() -> Command {
    Command::cargo_bin("softsell").expect("Failed to find softsell binary for testing")
}

/// A temp directory holding `config.toml` with `contents`.
pub fn write_config(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp config dir");
    std::fs::write(dir.path().join("config.toml"), contents).expect("Failed to write config");
    dir
}

/// `softsell --config <dir>/config.toml`, run from inside `dir`.
pub fn softsell_with_config(dir: &Path) -> Command {
    let mut cmd = softsell_cmd();
    cmd.current_dir(dir)
        .env_remove("SOFTSELL_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}
