//! Configuration file data structures

use super::size::{parse_size, SizeParseError};
use crate::diff::Compression;
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".sizewatch.toml";

/// sizewatch configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Directory holding the built files, relative to the project root
    pub base_dir: String,

    /// Compression for entries that don't set one
    #[serde(default)]
    pub default_compression: Compression,

    /// Branches whose builds are saved as commit records
    #[serde(default = "default_track_branches")]
    pub track_branches: Vec<String>,

    /// Only compare locally, never read or write commit records
    #[serde(default)]
    pub only_local: bool,

    /// Namespace for commit records when several projects share a repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_project: Option<String>,

    /// Files measured individually
    #[serde(default)]
    pub files: Vec<EntryConfig>,

    /// Globs measured as one summed entry
    #[serde(default)]
    pub groups: Vec<EntryConfig>,
}

fn default_track_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

/// One `[[files]]` or `[[groups]]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntryConfig {
    /// Glob relative to `base-dir`
    pub path: String,

    /// Size budget ("10kb", "1.5mb", "300")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,

    /// Allowed growth over the baseline, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_percent_increase: Option<f64>,

    /// Overrides `default-compression`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<Compression>,
}

impl EntryConfig {
    /// Entry without budgets
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Resolve size strings and compression against the file-level defaults
    pub fn normalize(&self, default_compression: Compression) -> Result<NormalizedEntry, SizeParseError> {
        let max_size = self.max_size.as_deref().map(parse_size).transpose()?;

        Ok(NormalizedEntry {
            pattern: self.path.clone(),
            max_size,
            max_percent_increase: self.max_percent_increase,
            compression: self.compression.unwrap_or(default_compression),
        })
    }
}

/// Entry with budgets in bytes and a concrete compression
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    /// Glob relative to the base directory
    pub pattern: String,
    /// Size budget in bytes
    pub max_size: Option<u64>,
    /// Allowed growth in percent
    pub max_percent_increase: Option<f64>,
    /// Compression to measure with
    pub compression: Compression,
}

/// Config with every size string parsed
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConfig {
    /// Directory holding the built files
    pub base_dir: String,
    /// Branches saved as commit records
    pub track_branches: Vec<String>,
    /// Skip commit records entirely
    pub only_local: bool,
    /// Commit record namespace
    pub sub_project: Option<String>,
    /// File entries
    pub files: Vec<NormalizedEntry>,
    /// Group entries
    pub groups: Vec<NormalizedEntry>,
}

impl NormalizedConfig {
    /// True if `branch` is one of the tracked branches
    pub fn is_tracked_branch(&self, branch: &str) -> bool {
        self.track_branches.iter().any(|b| b == branch)
    }
}

impl ConfigFile {
    /// Parse size strings and resolve compressions
    ///
    /// # Examples
    ///
    /// ```
    /// use sizewatch::config::{ConfigFile, EntryConfig};
    /// use sizewatch::diff::Compression;
    ///
    /// let mut config = ConfigFile::default();
    /// config.files.push(EntryConfig {
    ///     max_size: Some("10kb".to_string()),
    ///     ..EntryConfig::new("*.js")
    /// });
    ///
    /// let normalized = config.normalize()?;
    /// assert_eq!(normalized.files[0].max_size, Some(10 * 1024));
    /// assert_eq!(normalized.files[0].compression, Compression::Gzip);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn normalize(&self) -> Result<NormalizedConfig, SizeParseError> {
        let files = self
            .files
            .iter()
            .map(|f| f.normalize(self.default_compression))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = self
            .groups
            .iter()
            .map(|g| g.normalize(self.default_compression))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NormalizedConfig {
            base_dir: self.base_dir.clone(),
            track_branches: self.track_branches.clone(),
            only_local: self.only_local,
            sub_project: self.sub_project.clone(),
            files,
            groups,
        })
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            base_dir: "dist".to_string(),
            default_compression: Compression::default(),
            track_branches: default_track_branches(),
            only_local: false,
            sub_project: None,
            files: Vec::new(),
            groups: Vec::new(),
        }
    }
}
