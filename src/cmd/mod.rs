//! Command handlers for the sizewatch CLI
//!
//! Each submodule handles a specific CLI command.

pub mod check;
pub mod completions;
pub mod diff;
pub mod init;

// Re-export command functions for convenient access
pub use check::{cmd_check, CheckOptions};
pub use completions::cmd_completions;
pub use diff::cmd_diff;
pub use init::cmd_init;
