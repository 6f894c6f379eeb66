#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! sizewatch library
//!
//! Measures build artifacts, compares them against a baseline and enforces
//! size budgets. It can be used programmatically in addition to the CLI.
//!
//! # Basic Example
//!
//! Comparing measurements against a baseline:
//!
//! ```
//! use sizewatch::diff::{
//!     generate_diff_report, Compression, DiffChange, DiffReportInput, FileDetails, Status,
//! };
//!
//! let baseline = DiffReportInput::new(
//!     vec![FileDetails::new("main.js", 1000, Compression::Gzip)],
//!     vec![],
//! );
//! let current = DiffReportInput::new(
//!     vec![FileDetails::new("main.js", 1100, Compression::Gzip).with_max_percent_increase(5.0)],
//!     vec![],
//! );
//!
//! let report = generate_diff_report(&current, Some(&baseline));
//! assert_eq!(report.files[0].diff.change, DiffChange::Increase);
//! assert_eq!(report.status, Status::Fail);
//! ```
//!
//! # Advanced Example: Measuring a Directory
//!
//! ```
//! use sizewatch::collect::FileCollector;
//! use sizewatch::config::{ConfigFile, EntryConfig};
//! use sizewatch::diff::Compression;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let project = TempDir::new()?;
//! fs::create_dir_all(project.path().join("dist"))?;
//! fs::write(project.path().join("dist/app.js"), "console.log(1);")?;
//!
//! let config = ConfigFile {
//!     default_compression: Compression::None,
//!     files: vec![EntryConfig::new("*.js")],
//!     ..Default::default()
//! }
//! .normalize()?;
//!
//! let input = FileCollector::new(project.path(), &config).collect()?;
//! assert_eq!(input.files[0].path, "app.js");
//! assert_eq!(input.files[0].size, 15);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// CI/CD integration: commit records and report output
pub mod cicd;
/// Command handlers for CLI operations
pub mod cmd;
/// File discovery and compressed size measurement
pub mod collect;
/// Configuration file support
pub mod config;
/// Diff report engine
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Git metadata utilities
pub mod git;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
