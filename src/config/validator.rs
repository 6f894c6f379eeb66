//! Configuration validation
//!
//! Validators inspect a parsed [`ConfigFile`] and report issues with a
//! severity. Errors block the run; warnings are logged and ignored.

use super::file::{ConfigFile, EntryConfig};
use super::size::parse_size;
use std::collections::HashSet;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Should be addressed but not blocking
    Warning,
    /// Must be fixed
    Error,
}

impl ValidationSeverity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationSeverity::Warning => "WARNING",
            ValidationSeverity::Error => "ERROR",
        }
    }
}

/// A validation issue found in configuration
///
/// # Examples
///
/// ```
/// use sizewatch::config::validator::{ValidationIssue, ValidationSeverity};
///
/// let issue = ValidationIssue::error("files[0].max-size", "'ten' is not a valid size")
///     .with_suggestion("Use a size like \"10kb\"");
/// assert_eq!(issue.severity, ValidationSeverity::Error);
/// assert!(issue.suggestion.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: ValidationSeverity,
    /// Field or section that has the issue
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Suggested fix (if available)
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        severity: ValidationSeverity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create an error issue
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Error, field, message)
    }

    /// Create a warning issue
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Warning, field, message)
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors)
    pub valid: bool,
    /// Issues found during validation
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        if issue.severity == ValidationSeverity::Error {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Get only errors
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
            .collect()
    }
}

/// A single validation rule over the parsed config
pub trait ConfigValidator: Send + Sync {
    /// Validator name
    fn name(&self) -> &str;

    /// Validate configuration data
    fn validate(&self, config: &ConfigFile) -> ValidationResult;
}

/// Checks every `[[files]]` / `[[groups]]` entry
pub struct EntryValidator;

impl EntryValidator {
    fn check_entries(section: &str, entries: &[EntryConfig], result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (idx, entry) in entries.iter().enumerate() {
            let field = format!("{section}[{idx}]");

            if entry.path.trim().is_empty() {
                result.add_issue(ValidationIssue::error(
                    format!("{field}.path"),
                    "path must not be empty",
                ));
            } else if let Err(e) = glob::Pattern::new(&entry.path) {
                result.add_issue(ValidationIssue::error(
                    format!("{field}.path"),
                    format!("invalid glob '{}': {}", entry.path, e.msg),
                ));
            } else if !seen.insert(entry.path.as_str()) {
                result.add_issue(
                    ValidationIssue::warning(
                        format!("{field}.path"),
                        format!("duplicate pattern '{}'", entry.path),
                    )
                    .with_suggestion("Remove the duplicate entry; only the first one matches files"),
                );
            }

            if let Some(max_size) = &entry.max_size {
                if let Err(e) = parse_size(max_size) {
                    result.add_issue(
                        ValidationIssue::error(format!("{field}.max-size"), e.to_string())
                            .with_suggestion("Use a byte count or a size like \"10kb\" or \"1.5mb\""),
                    );
                }
            }

            if let Some(percent) = entry.max_percent_increase {
                if !percent.is_finite() || percent < 0.0 {
                    result.add_issue(ValidationIssue::error(
                        format!("{field}.max-percent-increase"),
                        format!("{percent} is not a non-negative percentage"),
                    ));
                }
            }
        }
    }
}

impl ConfigValidator for EntryValidator {
    fn name(&self) -> &str {
        "entries"
    }

    fn validate(&self, config: &ConfigFile) -> ValidationResult {
        let mut result = ValidationResult::success();

        if config.files.is_empty() && config.groups.is_empty() {
            result.add_issue(
                ValidationIssue::error("files", "no files or groups configured")
                    .with_suggestion("Add a [[files]] table with a path glob"),
            );
        }

        Self::check_entries("files", &config.files, &mut result);
        Self::check_entries("groups", &config.groups, &mut result);

        result
    }
}

/// Checks base directory and record settings
pub struct ProjectValidator;

impl ConfigValidator for ProjectValidator {
    fn name(&self) -> &str {
        "project"
    }

    fn validate(&self, config: &ConfigFile) -> ValidationResult {
        let mut result = ValidationResult::success();

        if config.base_dir.trim().is_empty() {
            result.add_issue(ValidationIssue::error("base-dir", "base-dir must not be empty"));
        }

        if config.track_branches.is_empty() && !config.only_local {
            result.add_issue(
                ValidationIssue::warning(
                    "track-branches",
                    "no tracked branches; commit records are only saved for builds with a base branch",
                )
                .with_suggestion("Add your default branch, e.g. track-branches = [\"main\"]"),
            );
        }

        if let Some(sub_project) = &config.sub_project {
            let valid = !sub_project.is_empty()
                && sub_project.len() <= 100
                && sub_project
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '));
            if !valid {
                result.add_issue(ValidationIssue::error(
                    "sub-project",
                    "sub-project must be 1-100 characters of [A-Za-z0-9_-. ]",
                ));
            }
        }

        result
    }
}

/// Ordered set of validators run by the config loader
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn ConfigValidator>>,
}

impl ValidatorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Register a validator
    pub fn register(&mut self, validator: Box<dyn ConfigValidator>) {
        self.validators.push(validator);
    }

    /// Run all validators
    pub fn validate_all(&self, config: &ConfigFile) -> ValidationResult {
        let mut result = ValidationResult::success();

        for validator in &self.validators {
            for issue in validator.validate(config).issues {
                log::debug!("validator '{}': {}", validator.name(), issue);
                result.add_issue(issue);
            }
        }

        result
    }

    /// Get validator count
    pub fn count(&self) -> usize {
        self.validators.len()
    }
}

impl Default for ValidatorRegistry {
    /// Registry with the built-in validators
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ProjectValidator));
        registry.register(Box::new(EntryValidator));
        registry
    }
}
