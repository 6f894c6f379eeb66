//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use sizewatch::config::ConfigLoader;
//! use sizewatch::error::ErrorFormatter;
//! use std::path::Path;
//!
//! match ConfigLoader::load(Path::new(".")) {
//!     Ok(config) => println!("Measuring files under {}", config.base_dir),
//!     Err(e) => {
//!         eprintln!("{}", ErrorFormatter::format(&e));
//!         std::process::exit(ErrorFormatter::exit_code(&e));
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::git::GitError;

/// sizewatch errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SizewatchError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {}", issues.join("; "))]
    InvalidConfig {
        /// One line per blocking issue
        issues: Vec<String>,
    },

    /// Directory with the built files does not exist
    #[error("Base directory not found: {path}")]
    BaseDirNotFound {
        /// Resolved base directory
        path: PathBuf,
    },

    /// A JSON input file could not be used
    #[error("Invalid input {path}: {reason}")]
    InvalidInput {
        /// Offending file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// One or more entries failed their size budget
    #[error("{failed} entr{} exceeded their size budget", if *failed == 1 { "y" } else { "ies" })]
    BudgetExceeded {
        /// Number of failing files and groups
        failed: usize,
    },

    /// Branch could not be determined for a commit record
    #[error("Could not determine the current branch")]
    BranchUnknown,

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Git metadata lookup failed
    #[error("git error: {0}")]
    Git(#[from] GitError),
}

impl SizewatchError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sizewatch::error::SizewatchError;
    ///
    /// let error = SizewatchError::BudgetExceeded { failed: 2 };
    /// assert!(error.suggestion().unwrap().contains("max-size"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigNotFound { .. } => {
                Some("Run 'sizewatch init' to create a configuration file".to_string())
            }
            Self::InvalidConfig { .. } => {
                Some("Fix the listed fields in .sizewatch.toml".to_string())
            }
            Self::BaseDirNotFound { path } => Some(format!(
                "Build your project first or point base-dir at the output directory (looked in {})",
                path.display()
            )),
            Self::InvalidInput { .. } => Some(
                "Inputs must be JSON objects with \"files\" and \"groups\" arrays of measured entries"
                    .to_string(),
            ),
            Self::BudgetExceeded { .. } => Some(
                "Reduce the size of the failing entries or raise their max-size / max-percent-increase budgets"
                    .to_string(),
            ),
            Self::BranchUnknown => Some(
                "Pass --branch explicitly, or run inside a git checkout (or use --local)"
                    .to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Git(_) => Some("Pass --branch and --commit explicitly".to_string()),
        }
    }

    /// Get documentation URL for this error.
    ///
    /// No variant links anywhere until the project publishes documentation.
    pub fn docs_url(&self) -> Option<&str> {
        None
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use sizewatch::error::SizewatchError;
    ///
    /// assert_eq!(SizewatchError::BudgetExceeded { failed: 1 }.exit_code(), 1);
    /// assert_eq!(SizewatchError::InvalidConfig { issues: vec![] }.exit_code(), 78);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT (sysexits.h)
            Self::InvalidConfig { .. } => 78,  // EX_CONFIG
            Self::BaseDirNotFound { .. } => 66, // EX_NOINPUT
            Self::InvalidInput { .. } => 65,   // EX_DATAERR
            Self::BudgetExceeded { .. } => 1,  // Generic error (CI should fail)
            Self::BranchUnknown => 64,         // EX_USAGE
            Self::Io { .. } => 74,             // EX_IOERR
            Self::Git(_) => 69,                // EX_UNAVAILABLE
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(sw_error) = error.downcast_ref::<SizewatchError>() {
            if let Some(suggestion) = sw_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = sw_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        error
            .chain()
            .find_map(|e| e.downcast_ref::<SizewatchError>())
            .map_or(1, SizewatchError::exit_code)
    }
}
