//! Commit records for base comparisons
//!
//! Stores measured files per commit in `.sizewatch/records.json` so a later
//! build can find the record it should be compared against:
//! - newest first, capped at [`RecordStore::MAX_RECORDS`]
//! - one record per (sub-project, commit)
//! - base lookup by branch, sub-project and creation time

use crate::diff::{DiffReportInput, FileDetails};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// What a build reports about itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecordPayload {
    /// Branch the build ran on
    pub branch: String,
    /// Commit the build ran on
    pub commit_sha: String,
    /// Target branch of a pull request build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
    /// Record namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_project: Option<String>,
    /// Measured files
    pub files: Vec<FileDetails>,
    /// Measured groups
    pub groups: Vec<FileDetails>,
}

/// Stored measurement of one commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    /// Random v4 UUID
    pub id: String,
    /// When the record was created
    pub creation_date: DateTime<Utc>,
    /// Branch the build ran on
    pub branch: String,
    /// Commit the build ran on
    pub commit_sha: String,
    /// Target branch of a pull request build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
    /// Record namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_project: Option<String>,
    /// Measured files
    pub files: Vec<FileDetails>,
    /// Measured groups
    pub groups: Vec<FileDetails>,
}

impl CommitRecord {
    /// Stamp a payload with a fresh id and the current time
    pub fn from_payload(payload: CommitRecordPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            creation_date: Utc::now(),
            branch: payload.branch,
            commit_sha: payload.commit_sha,
            base_branch: payload.base_branch,
            sub_project: payload.sub_project,
            files: payload.files,
            groups: payload.groups,
        }
    }

    /// Branch whose records this one is compared against
    pub fn compare_branch(&self) -> &str {
        self.base_branch.as_deref().unwrap_or(&self.branch)
    }

    /// Files and groups as diff engine input
    pub fn to_input(&self) -> DiffReportInput {
        DiffReportInput::new(self.files.clone(), self.groups.clone())
    }
}

/// Commit record file manager
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    /// Records, newest first
    pub records: Vec<CommitRecord>,
}

impl RecordStore {
    const RECORDS_DIR: &'static str = ".sizewatch";
    const RECORDS_FILE: &'static str = "records.json";
    /// Records kept on disk
    pub const MAX_RECORDS: usize = 100;

    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records from the project root (empty if none were saved yet)
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load records with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<Self> {
        let records_path = Self::records_path(project_root);

        let contents = match fs.read_to_string(&records_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No records at {}", records_path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e).context("Failed to read commit records"),
        };

        serde_json::from_str(&contents).context("Failed to parse commit records")
    }

    /// Save records to the project root
    pub fn save(&self, project_root: &Path) -> Result<()> {
        self.save_with_fs(project_root, &RealFileSystem)
    }

    /// Save records with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(&self, project_root: &Path, fs: &FS) -> Result<()> {
        fs.create_dir_all(&project_root.join(Self::RECORDS_DIR))
            .context("Failed to create .sizewatch directory")?;

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize commit records")?;

        fs.write(&Self::records_path(project_root), contents)
            .context("Failed to write commit records")?;

        Ok(())
    }

    /// Insert a record, replacing any record of the same sub-project and commit.
    ///
    /// # Examples
    ///
    /// ```
    /// use sizewatch::cicd::history::{CommitRecordPayload, RecordStore};
    ///
    /// let payload = CommitRecordPayload {
    ///     branch: "main".to_string(),
    ///     commit_sha: "abc123".to_string(),
    ///     base_branch: None,
    ///     sub_project: None,
    ///     files: vec![],
    ///     groups: vec![],
    /// };
    ///
    /// let mut store = RecordStore::new();
    /// store.save_record(payload.clone());
    /// store.save_record(payload);
    /// assert_eq!(store.records.len(), 1);
    /// ```
    pub fn save_record(&mut self, payload: CommitRecordPayload) -> CommitRecord {
        self.insert(CommitRecord::from_payload(payload))
    }

    /// Insert an already stamped record with the same upsert rule
    pub fn insert(&mut self, record: CommitRecord) -> CommitRecord {
        let before = self.records.len();
        self.records.retain(|r| {
            !(r.sub_project == record.sub_project && r.commit_sha == record.commit_sha)
        });
        if self.records.len() < before {
            log::info!("Replacing record for commit {}", record.commit_sha);
        }

        self.records.insert(0, record.clone());
        self.records.truncate(Self::MAX_RECORDS);

        record
    }

    /// Latest record on the compare branch of `record`, same sub-project,
    /// created strictly before it.
    pub fn find_base(&self, record: &CommitRecord) -> Option<&CommitRecord> {
        let branch = record.compare_branch();

        self.records
            .iter()
            .filter(|r| {
                r.id != record.id
                    && r.branch == branch
                    && r.sub_project == record.sub_project
                    && r.creation_date < record.creation_date
            })
            .max_by_key(|r| r.creation_date)
    }

    fn records_path(project_root: &Path) -> PathBuf {
        project_root
            .join(Self::RECORDS_DIR)
            .join(Self::RECORDS_FILE)
    }
}
