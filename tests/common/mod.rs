//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for report entries
//! - Project and measurement fixtures
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::*;
//!
//! let project = project_with_config(BASIC_CONFIG, &[("main.js", "x")])?;
//! ```

pub mod assertions;
pub mod fixtures;
