//! # SoftSell Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!

/// Directory creation and file writes with error context.
pub mod io;
