//! Init command implementation
//!
//! Handles the `sizewatch init` command which writes a starter
//! `.sizewatch.toml` to the current directory.

use anyhow::{Context, Result};
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ConfigFile, ConfigLoader, EntryConfig};
use crate::fmt::{CHECKMARK, INFO, SPARKLES, WARNING};

/// Starter configuration: every script budgeted, styles summed as a group
pub fn starter_config() -> ConfigFile {
    ConfigFile {
        files: vec![EntryConfig {
            max_size: Some("250kb".to_string()),
            max_percent_increase: Some(5.0),
            ..EntryConfig::new("**/*.js")
        }],
        groups: vec![EntryConfig {
            max_size: Some("100kb".to_string()),
            ..EntryConfig::new("**/*.css")
        }],
        ..Default::default()
    }
}

/// Create `.sizewatch.toml` in the current directory
///
/// # Examples
///
/// ```no_run
/// use sizewatch::cmd::init::cmd_init;
///
/// cmd_init()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init() -> Result<()> {
    let project_root = env::current_dir().context("Failed to get current directory")?;

    println!("{} {}", SPARKLES, style("sizewatch init").bold());
    println!();

    if !init_in(&project_root)? {
        println!(
            "{} Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Next Steps:", INFO);
    println!(
        "   1. Point {} at your build output and adjust the budgets",
        style("base-dir").cyan()
    );
    println!("   2. Run {} after building", style("sizewatch check").cyan());

    Ok(())
}

/// Write the starter config unless one exists; returns whether it was written
pub fn init_in(project_root: &Path) -> Result<bool> {
    if ConfigLoader::exists(project_root) {
        return Ok(false);
    }

    ConfigLoader::save(&starter_config(), project_root)?;
    log::info!("Wrote {}", project_root.join(config::CONFIG_FILE_NAME).display());
    Ok(true)
}
