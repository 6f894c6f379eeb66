//! File measurement
//!
//! Walks the configured base directory, matches files against the configured
//! globs and measures each match with its compression. The result is the
//! [`DiffReportInput`] the diff engine consumes.

pub mod compression;

pub use compression::compressed_size;

use crate::config::{NormalizedConfig, NormalizedEntry};
use crate::diff::{Compression, DiffReportInput, FileDetails};
use crate::error::SizewatchError;
use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A file under the base directory
#[derive(Debug, Clone)]
struct Candidate {
    /// Path relative to the base directory, `/`-separated
    relative: String,
    absolute: PathBuf,
}

/// Collects and measures the files configured in `.sizewatch.toml`
pub struct FileCollector<'a> {
    base_dir: PathBuf,
    config: &'a NormalizedConfig,
}

impl<'a> FileCollector<'a> {
    /// Collector for `config.base_dir` resolved against `project_root`
    pub fn new(project_root: &Path, config: &'a NormalizedConfig) -> Self {
        Self {
            base_dir: project_root.join(&config.base_dir),
            config,
        }
    }

    /// Directory being measured
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Walk, match and measure.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sizewatch::collect::FileCollector;
    /// use sizewatch::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?.normalize()?;
    /// let input = FileCollector::new(Path::new("."), &config).collect()?;
    /// println!("measured {} files", input.files.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn collect(&self) -> Result<DiffReportInput> {
        if !self.base_dir.is_dir() {
            return Err(SizewatchError::BaseDirNotFound {
                path: self.base_dir.clone(),
            }
            .into());
        }

        let candidates = self.list_files()?;
        log::info!(
            "Found {} files under {}",
            candidates.len(),
            self.base_dir.display()
        );

        let files = self.collect_files(&candidates)?;
        let groups = self.collect_groups(&candidates)?;

        Ok(DiffReportInput::new(files, groups))
    }

    fn list_files(&self) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();

        for entry in WalkDir::new(&self.base_dir).follow_links(false) {
            let entry = entry.with_context(|| {
                format!("Failed to read directory {}", self.base_dir.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let absolute = entry.into_path();
            let Ok(relative) = absolute.strip_prefix(&self.base_dir) else {
                continue;
            };
            candidates.push(Candidate {
                relative: to_slash_path(relative),
                absolute,
            });
        }

        candidates.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(candidates)
    }

    fn collect_files(&self, candidates: &[Candidate]) -> Result<Vec<FileDetails>> {
        let patterns = compile_patterns(&self.config.files)?;
        let mut match_counts = vec![0usize; patterns.len()];

        // A file belongs to the first file pattern that matches it
        let mut jobs: Vec<(usize, &Candidate)> = Vec::new();
        for candidate in candidates {
            if let Some(idx) = patterns
                .iter()
                .position(|p| p.matches_with(&candidate.relative, MATCH_OPTIONS))
            {
                match_counts[idx] += 1;
                jobs.push((idx, candidate));
            }
        }

        for (entry, count) in self.config.files.iter().zip(&match_counts) {
            if *count == 0 {
                log::warn!("No files matched pattern '{}'", entry.pattern);
            }
        }

        jobs.sort_by(|(ia, a), (ib, b)| ia.cmp(ib).then_with(|| a.relative.cmp(&b.relative)));

        jobs.par_iter()
            .map(|(idx, candidate)| -> Result<FileDetails> {
                let entry = &self.config.files[*idx];
                let size = measure(&candidate.absolute, entry.compression)?;
                Ok(to_details(entry, candidate.relative.clone(), size))
            })
            .collect()
    }

    fn collect_groups(&self, candidates: &[Candidate]) -> Result<Vec<FileDetails>> {
        let patterns = compile_patterns(&self.config.groups)?;

        self.config
            .groups
            .iter()
            .zip(&patterns)
            .map(|(entry, pattern)| -> Result<FileDetails> {
                let matched: Vec<&Candidate> = candidates
                    .iter()
                    .filter(|c| pattern.matches_with(&c.relative, MATCH_OPTIONS))
                    .collect();

                if matched.is_empty() {
                    log::warn!("No files matched group '{}'", entry.pattern);
                }

                let size = matched
                    .par_iter()
                    .map(|c| measure(&c.absolute, entry.compression))
                    .collect::<Result<Vec<u64>>>()?
                    .into_iter()
                    .sum::<u64>();

                log::debug!(
                    "Group '{}': {} files, {} bytes",
                    entry.pattern,
                    matched.len(),
                    size
                );
                Ok(to_details(entry, entry.pattern.clone(), size))
            })
            .collect()
    }
}

fn compile_patterns(entries: &[NormalizedEntry]) -> Result<Vec<Pattern>> {
    entries
        .iter()
        .map(|e| {
            Pattern::new(&e.pattern).with_context(|| format!("Invalid glob '{}'", e.pattern))
        })
        .collect()
}

fn measure(path: &Path, compression: Compression) -> Result<u64> {
    let data = std::fs::read(path).map_err(|source| SizewatchError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;

    compressed_size(&data, compression).map_err(|source| {
        SizewatchError::Io {
            context: format!("compressing {} with {}", path.display(), compression),
            source,
        }
        .into()
    })
}

fn to_details(entry: &NormalizedEntry, path: String, size: u64) -> FileDetails {
    FileDetails {
        pattern: entry.pattern.clone(),
        path,
        size,
        compression: entry.compression,
        max_size: entry.max_size,
        max_percent_increase: entry.max_percent_increase,
    }
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFile, EntryConfig};
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = temp.path().join("dist").join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        temp
    }

    fn config(files: Vec<EntryConfig>, groups: Vec<EntryConfig>) -> NormalizedConfig {
        ConfigFile {
            default_compression: Compression::None,
            files,
            groups,
            ..Default::default()
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_collect_missing_base_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = config(vec![EntryConfig::new("*.js")], vec![]);

        let err = FileCollector::new(temp.path(), &config)
            .collect()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SizewatchError>(),
            Some(SizewatchError::BaseDirNotFound { .. })
        ));
    }

    #[test]
    fn test_collect_files_with_budgets() {
        let temp = project(&[("main.js", "12345"), ("vendor.js", "123"), ("app.css", "1")]);
        let config = config(
            vec![EntryConfig {
                max_size: Some("4".to_string()),
                ..EntryConfig::new("*.js")
            }],
            vec![],
        );

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();

        let paths: Vec<&str> = input.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["main.js", "vendor.js"]);
        assert_eq!(input.files[0].size, 5);
        assert_eq!(input.files[0].pattern, "*.js");
        assert_eq!(input.files[0].max_size, Some(4));
        assert_eq!(input.files[1].size, 3);
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let temp = project(&[("main.js", "a"), ("chunks/1.js", "bb")]);
        let config = config(vec![EntryConfig::new("*.js")], vec![]);

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();
        assert_eq!(input.files.len(), 1);
        assert_eq!(input.files[0].path, "main.js");
    }

    #[test]
    fn test_nested_paths_use_forward_slashes() {
        let temp = project(&[("chunks/a/1.js", "a"), ("main.js", "bb")]);
        let config = config(vec![EntryConfig::new("**/*.js")], vec![]);

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();
        let paths: Vec<&str> = input.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["chunks/a/1.js", "main.js"]);
    }

    #[test]
    fn test_file_belongs_to_first_matching_pattern() {
        let temp = project(&[("main.js", "a"), ("vendor.js", "bb")]);
        let config = config(
            vec![EntryConfig::new("main.js"), EntryConfig::new("*.js")],
            vec![],
        );

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();
        assert_eq!(input.files.len(), 2);
        assert_eq!(input.files[0].pattern, "main.js");
        assert_eq!(input.files[1].pattern, "*.js");
        assert_eq!(input.files[1].path, "vendor.js");
    }

    #[test]
    fn test_groups_sum_matched_files() {
        let temp = project(&[("a.css", "12"), ("nested/b.css", "345"), ("c.js", "6")]);
        let config = config(
            vec![],
            vec![
                EntryConfig {
                    max_size: Some("10".to_string()),
                    ..EntryConfig::new("**/*.css")
                },
                EntryConfig::new("*.png"),
            ],
        );

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();

        assert!(input.files.is_empty());
        assert_eq!(input.groups.len(), 2);
        assert_eq!(input.groups[0].path, "**/*.css");
        assert_eq!(input.groups[0].pattern, "**/*.css");
        assert_eq!(input.groups[0].size, 5);
        assert_eq!(input.groups[0].max_size, Some(10));
        assert_eq!(input.groups[1].size, 0);
    }

    #[test]
    fn test_gzip_compression_is_applied() {
        let body = "console.log('hello');\n".repeat(100);
        let temp = project(&[("main.js", body.as_str())]);
        let config = config(
            vec![EntryConfig {
                compression: Some(Compression::Gzip),
                ..EntryConfig::new("*.js")
            }],
            vec![],
        );

        let input = FileCollector::new(temp.path(), &config).collect().unwrap();
        assert_eq!(input.files[0].compression, Compression::Gzip);
        assert!(input.files[0].size < body.len() as u64);
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let temp = project(&[("main.js", "a")]);
        let config = config(vec![EntryConfig::new("[.js")], vec![]);

        let err = FileCollector::new(temp.path(), &config)
            .collect()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid glob"));
    }
}
