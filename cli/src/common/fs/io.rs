//! # SoftSell Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//!
//! Small wrappers over `std::fs` that add error context. Used by the lead
//! outbox to create its directory and drop files into it.
//!
use crate::core::error::{Result, SoftsellError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Creates `path` (and parents) if missing. Fails if it exists as a non-directory.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(SoftsellError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Writes `content` to `path`, creating the parent directory first. Overwrites.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("outbox/pending");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_already_exists() -> Result<()> {
        let base_dir = tempdir()?;
        ensure_dir_exists(base_dir.path())?;
        assert!(base_dir.path().is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parent_and_overwrites() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/lead.json");
        write_string_to_file(&file_path, "{}")?;
        write_string_to_file(&file_path, "{\"name\":\"A\"}")?;
        assert_eq!(fs::read_to_string(&file_path)?, "{\"name\":\"A\"}");
        Ok(())
    }
}
