//! JSON output formatting for CI/CD integration

use crate::cicd::history::CommitRecord;
use crate::diff::DiffReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON output structure for CI/CD tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonOutput {
    /// Overall report passed
    pub success: bool,
    /// Record saved for this build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordInfo>,
    /// Record this build was compared against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_record: Option<RecordInfo>,
    /// Full diff report
    pub report: DiffReport,
}

/// Identifying fields of a commit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInfo {
    /// Record id
    pub id: String,
    /// Branch the record was built on
    pub branch: String,
    /// Commit the record was built on
    pub commit_sha: String,
    /// When the record was created
    pub creation_date: DateTime<Utc>,
}

impl RecordInfo {
    /// Copy the identifying fields of a record
    pub fn from_record(record: &CommitRecord) -> Self {
        Self {
            id: record.id.clone(),
            branch: record.branch.clone(),
            commit_sha: record.commit_sha.clone(),
            creation_date: record.creation_date,
        }
    }
}

impl JsonOutput {
    /// Wrap a report
    pub fn new(report: DiffReport) -> Self {
        Self {
            success: report.passed(),
            record: None,
            base_record: None,
            report,
        }
    }

    /// Add the saved record
    pub fn with_record(mut self, record: &CommitRecord) -> Self {
        self.record = Some(RecordInfo::from_record(record));
        self
    }

    /// Add the base record
    pub fn with_base_record(mut self, record: &CommitRecord) -> Self {
        self.base_record = Some(RecordInfo::from_record(record));
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize JSON output")
    }

    /// Print JSON to stdout
    pub fn print(&self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        }
    }

    /// Write JSON to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}
