//! CI/CD integration
//!
//! Provides:
//! - Commit records for comparing a build against its base
//! - JSON output for CI/CD tool integration
//! - Console rendering of diff reports

pub mod display;
pub mod history;
pub mod output;

pub use history::{CommitRecord, CommitRecordPayload, RecordStore};
pub use output::{JsonOutput, RecordInfo};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cicd_module_exports_are_accessible() {
        let _: Option<RecordStore> = None;
        let _: Option<CommitRecord> = None;
        let _: Option<JsonOutput> = None;
    }
}
