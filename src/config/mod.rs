//! `.sizewatch.toml` support
//!
//! - [`file`]: the TOML data model and its normalized form
//! - [`size`]: size strings such as `"10kb"`
//! - [`validator`]: field checks run on load
//! - [`loader`]: reading and writing the file

pub mod file;
pub mod loader;
pub mod size;
pub mod validator;

pub use file::{ConfigFile, EntryConfig, NormalizedConfig, NormalizedEntry, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use size::{parse_size, SizeParseError};
pub use validator::{
    ConfigValidator, ValidationIssue, ValidationResult, ValidationSeverity, ValidatorRegistry,
};
