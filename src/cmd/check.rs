//! Check command implementation
//!
//! Handles the `sizewatch check` command: measure the configured files,
//! look up the base commit record, save this build's record when the branch
//! is tracked, and report against the budgets.

use anyhow::{Context, Result};
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use crate::cicd::display::print_report;
use crate::cicd::{CommitRecord, CommitRecordPayload, JsonOutput, RecordStore};
use crate::collect::FileCollector;
use crate::config::{ConfigLoader, NormalizedConfig};
use crate::diff::{generate_diff_report, DiffReport, DiffReportInput};
use crate::error::SizewatchError;
use crate::fmt::{INFO, SPARKLES};
use crate::git::{GitError, GitRepository};
use crate::infra::CommandExecutor;

/// Flags of `sizewatch check`
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Print JSON instead of the console table
    pub json: bool,
    /// Also write the JSON report to this file
    pub output: Option<PathBuf>,
    /// Branch override (defaults to the git branch)
    pub branch: Option<String>,
    /// Commit override (defaults to git `HEAD`)
    pub commit: Option<String>,
    /// Target branch of a pull request build
    pub base_branch: Option<String>,
    /// Skip commit records
    pub local: bool,
}

/// Report plus the records involved in producing it
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Evaluated report
    pub report: DiffReport,
    /// Record saved for this build, if the branch is tracked
    pub record: Option<CommitRecord>,
    /// Record the build was compared against
    pub base_record: Option<CommitRecord>,
}

/// Measure, compare and report from the current directory
///
/// # Examples
///
/// ```no_run
/// use sizewatch::cmd::check::{cmd_check, CheckOptions};
///
/// cmd_check(&CheckOptions { json: true, ..Default::default() })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`SizewatchError::BudgetExceeded`] when any entry fails, in
/// addition to config, measurement and record store errors.
pub fn cmd_check(options: &CheckOptions) -> Result<()> {
    let project_root = env::current_dir().context("Failed to get current directory")?;

    if !options.json {
        println!("{} {}", SPARKLES, style("sizewatch check").bold());
    }

    let outcome = run_check(&project_root, options, &GitRepository::new())?;
    present(&outcome, options)?;

    if outcome.report.passed() {
        Ok(())
    } else {
        Err(SizewatchError::BudgetExceeded {
            failed: outcome.report.failures().count(),
        }
        .into())
    }
}

/// Run a check without printing anything
pub fn run_check<CE: CommandExecutor>(
    project_root: &Path,
    options: &CheckOptions,
    git: &GitRepository<CE>,
) -> Result<CheckOutcome> {
    let config = ConfigLoader::load(project_root)?
        .normalize()
        .context("Failed to resolve size budgets")?;

    let input = FileCollector::new(project_root, &config).collect()?;

    if options.local || config.only_local {
        log::info!("Local mode, skipping commit records");
        return Ok(CheckOutcome {
            report: generate_diff_report(&input, None),
            record: None,
            base_record: None,
        });
    }

    let payload = build_payload(&config, options, git, &input)?;
    let should_save = config.is_tracked_branch(&payload.branch) || payload.base_branch.is_some();
    let record = CommitRecord::from_payload(payload);

    let mut store = RecordStore::load(project_root)?;
    if should_save {
        store.insert(record.clone());
        store.save(project_root)?;
        log::info!(
            "Saved record {} for {}@{}",
            record.id,
            record.branch,
            record.commit_sha
        );
    } else {
        log::info!("Branch '{}' is not tracked, record not saved", record.branch);
    }

    let base_record = store.find_base(&record).cloned();
    match &base_record {
        Some(base) => log::info!("Comparing against {}@{}", base.branch, base.commit_sha),
        None => log::info!("No base record on '{}'", record.compare_branch()),
    }

    let baseline = base_record.as_ref().map(CommitRecord::to_input);
    let report = generate_diff_report(&input, baseline.as_ref());

    Ok(CheckOutcome {
        report,
        record: should_save.then_some(record),
        base_record,
    })
}

fn build_payload<CE: CommandExecutor>(
    config: &NormalizedConfig,
    options: &CheckOptions,
    git: &GitRepository<CE>,
    input: &DiffReportInput,
) -> Result<CommitRecordPayload> {
    let branch = match &options.branch {
        Some(branch) => branch.clone(),
        None => git.branch_name()?.ok_or(SizewatchError::BranchUnknown)?,
    };
    let commit_sha = match &options.commit {
        Some(commit) => commit.clone(),
        None => git
            .commit_sha()?
            .ok_or(SizewatchError::Git(GitError::NotARepository))?,
    };

    Ok(CommitRecordPayload {
        branch,
        commit_sha,
        base_branch: options.base_branch.clone(),
        sub_project: config.sub_project.clone(),
        files: input.files.clone(),
        groups: input.groups.clone(),
    })
}

fn present(outcome: &CheckOutcome, options: &CheckOptions) -> Result<()> {
    let mut output = JsonOutput::new(outcome.report.clone());
    if let Some(record) = &outcome.record {
        output = output.with_record(record);
    }
    if let Some(base) = &outcome.base_record {
        output = output.with_base_record(base);
    }

    if let Some(path) = &options.output {
        output.write_to(path)?;
    }

    if options.json {
        output.print();
        return Ok(());
    }

    match &outcome.base_record {
        Some(base) => println!(
            "{} Compared with {} ({})",
            INFO,
            style(&base.branch).cyan(),
            style(short_sha(&base.commit_sha)).dim()
        ),
        None => println!("{} No base record, sizes shown as new", INFO),
    }
    print_report(&outcome.report);

    if let Some(path) = &options.output {
        println!("{} Report written to {}", INFO, path.display());
    }

    Ok(())
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
