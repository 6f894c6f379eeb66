//! Test fixture helpers for creating test projects
//!
//! Provides utilities for setting up projects with a `.sizewatch.toml`, a
//! `dist/` directory of build output, and JSON measurement files.

#![allow(dead_code)]

use sizewatch::diff::{Compression, DiffReportInput, FileDetails};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Uncompressed `*.js` files with a 100 byte / 10% budget
pub const BASIC_CONFIG: &str = r#"
base-dir = "dist"
default-compression = "none"

[[files]]
path = "*.js"
max-size = "100"
max-percent-increase = 10
"#;

/// Creates a project with the given config and `dist/` files
///
/// The TempDir must be kept alive for the duration of the test
pub fn project_with_config(config: &str, files: &[(&str, &str)]) -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join(".sizewatch.toml"), config)?;
    fs::create_dir_all(temp_dir.path().join("dist"))?;
    for (path, contents) in files {
        write_dist_file(temp_dir.path(), path, contents)?;
    }
    Ok(temp_dir)
}

/// Write (or overwrite) a file under `dist/`
pub fn write_dist_file(project: &Path, path: &str, contents: &str) -> anyhow::Result<()> {
    let full = project.join("dist").join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(full, contents)?;
    Ok(())
}

/// Uncompressed file entry without budgets
pub fn details(path: &str, size: u64) -> FileDetails {
    FileDetails::new(path, size, Compression::None)
}

/// Write a measurement file and return its path
pub fn write_input(dir: &Path, name: &str, input: &DiffReportInput) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(input)?)?;
    Ok(path)
}
