//! Human-readable size strings ("10kb", "1.5 MB", "300")

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Size string parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeParseError {
    /// Not a number with an optional unit
    #[error("'{0}' is not a valid size (expected e.g. \"300\", \"10kb\", \"1.5mb\")")]
    InvalidFormat(String),

    /// Value does not fit in a u64 byte count
    #[error("'{0}' is too large")]
    Overflow(String),
}

// Pattern is a literal, so compilation cannot fail at runtime
#[allow(clippy::unwrap_used)]
fn size_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*([A-Za-z]+)?\s*$").unwrap())
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    match unit.to_ascii_lowercase().as_str() {
        "b" => Some(1),
        "kb" => Some(1 << 10),
        "mb" => Some(1 << 20),
        "gb" => Some(1 << 30),
        "tb" => Some(1 << 40),
        _ => None,
    }
}

/// Parse a size string into bytes (1024-based units, fractional bytes floored)
///
/// # Examples
///
/// ```
/// use sizewatch::config::size::parse_size;
///
/// assert_eq!(parse_size("300").unwrap(), 300);
/// assert_eq!(parse_size("10kb").unwrap(), 10 * 1024);
/// assert_eq!(parse_size("1.5 MB").unwrap(), 1_572_864);
/// assert!(parse_size("ten kb").is_err());
/// ```
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let caps = size_regex()
        .captures(input)
        .ok_or_else(|| SizeParseError::InvalidFormat(input.to_string()))?;

    let number = &caps[1];
    let multiplier = match caps.get(2) {
        Some(unit) => unit_multiplier(unit.as_str())
            .ok_or_else(|| SizeParseError::InvalidFormat(input.to_string()))?,
        None => 1,
    };

    if !number.contains('.') {
        let value: u64 = number
            .parse()
            .map_err(|_| SizeParseError::Overflow(input.to_string()))?;
        return value
            .checked_mul(multiplier)
            .ok_or_else(|| SizeParseError::Overflow(input.to_string()));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| SizeParseError::InvalidFormat(input.to_string()))?;
    let bytes = (value * multiplier as f64).floor();
    if bytes >= u64::MAX as f64 {
        return Err(SizeParseError::Overflow(input.to_string()));
    }

    Ok(bytes as u64)
}
