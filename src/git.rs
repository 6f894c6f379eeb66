//! Git metadata for commit records

use crate::infra::{CommandExecutor, RealCommandExecutor};
use thiserror::Error;

/// Git operation errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command failed with an error message
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    /// The current directory is not a git repository
    #[error("Not a git repository")]
    NotARepository,

    /// Git output contained invalid UTF-8
    #[error("Invalid UTF-8 in git output")]
    InvalidUtf8,

    /// IO error occurred while executing git command
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Git repository interface with dependency injection for testability
pub struct GitRepository<CE: CommandExecutor = RealCommandExecutor> {
    cmd_executor: CE,
}

impl GitRepository<RealCommandExecutor> {
    /// Create a new GitRepository with real command execution
    pub fn new() -> Self {
        Self {
            cmd_executor: RealCommandExecutor,
        }
    }
}

impl Default for GitRepository<RealCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<CE: CommandExecutor> GitRepository<CE> {
    /// Create a GitRepository with a custom command executor (for testing)
    pub fn with_executor(cmd_executor: CE) -> Self {
        Self { cmd_executor }
    }

    /// Full SHA of `HEAD`.
    ///
    /// `Ok(None)` outside a repository or when git is not installed.
    pub fn commit_sha(&self) -> Result<Option<String>, GitError> {
        self.rev_parse(&["rev-parse", "HEAD"])
    }

    /// Current branch name (`HEAD` when detached).
    pub fn branch_name(&self) -> Result<Option<String>, GitError> {
        self.rev_parse(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn rev_parse(&self, args: &[&str]) -> Result<Option<String>, GitError> {
        let output = match self.cmd_executor.execute(|cmd| cmd.args(args), "git") {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("git not found on PATH");
                return Ok(None);
            }
            Err(e) => return Err(GitError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                return Ok(None);
            }
            return Err(GitError::CommandFailed(stderr.trim().to_string()));
        }

        let value = String::from_utf8(output.stdout)
            .map_err(|_| GitError::InvalidUtf8)?
            .trim()
            .to_string();

        Ok((!value.is_empty()).then_some(value))
    }
}
