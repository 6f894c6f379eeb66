//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use super::validator::ValidatorRegistry;
use crate::error::SizewatchError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate `.sizewatch.toml` from the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sizewatch::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("{} file entries", config.files.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SizewatchError::ConfigNotFound {
                    path: config_path,
                    source: e,
                }
                .into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read {CONFIG_FILE_NAME}"));
            }
        };

        let config: ConfigFile = toml_edit::de::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let result = ValidatorRegistry::default().validate_all(&config);
        for warning in result.warnings() {
            log::warn!("{CONFIG_FILE_NAME}: {warning}");
        }
        if !result.valid {
            return Err(SizewatchError::InvalidConfig {
                issues: result.errors().iter().map(|i| i.to_string()).collect(),
            }
            .into());
        }

        log::debug!(
            "Loaded {} with {} files and {} groups",
            config_path.display(),
            config.files.len(),
            config.groups.len()
        );

        Ok(config)
    }

    /// Save config to `.sizewatch.toml` in the given directory
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .with_context(|| format!("Failed to write {CONFIG_FILE_NAME}"))?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        Self::exists_with_fs(project_root, &RealFileSystem)
    }

    /// Existence check with a custom filesystem implementation
    pub fn exists_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> bool {
        fs.exists(&project_root.join(CONFIG_FILE_NAME))
    }
}
