//! Size literals and human-readable sizes.
//!
//! Both directions share one unit table, ordered smallest to largest.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CapError, Result};

/// Suffix to multiplier table (powers of 1024).
pub const UNITS: &[(char, u64)] = &[
    ('k', 1 << 10),
    ('m', 1 << 20),
    ('g', 1 << 30),
    ('t', 1 << 40),
];

/// Parse a size literal like "2.5T", "500g" or "1048576" into bytes.
///
/// Suffixed literals may be fractional and are truncated toward zero. A
/// literal without a suffix must be an exact integer byte count.
pub fn parse_size(literal: &str) -> Result<u64> {
    static SUFFIXED_RE: OnceLock<Regex> = OnceLock::new();

    let text = literal.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Err(CapError::InvalidSize(
            literal.to_string(),
            "empty size".to_string(),
        ));
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<u64>().map_err(|e| {
            CapError::InvalidSize(literal.to_string(), format!("invalid byte count: {e}"))
        });
    }

    let re = SUFFIXED_RE.get_or_init(|| {
        Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)([a-z])$")
            .expect("size literal regex should compile")
    });
    let Some(captures) = re.captures(&text) else {
        return Err(CapError::InvalidSize(
            literal.to_string(),
            "expected an integer or a number followed by K, M, G or T".to_string(),
        ));
    };

    let suffix = captures[2].chars().next().unwrap_or_default();
    let Some(&(_, multiplier)) = UNITS.iter().find(|(unit, _)| *unit == suffix) else {
        return Err(CapError::InvalidSize(
            literal.to_string(),
            format!("unknown size suffix: {}", suffix.to_ascii_uppercase()),
        ));
    };

    let base: f64 = captures[1].parse().map_err(|_| {
        CapError::InvalidSize(literal.to_string(), "invalid number format".to_string())
    })?;

    let bytes = base * multiplier as f64;
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(CapError::InvalidSize(
            literal.to_string(),
            "size too large".to_string(),
        ));
    }

    Ok(bytes as u64)
}

/// Format a byte count with the largest unit that keeps the value at or above
/// one, e.g. "2.4T" or "512.0M". Anything under 1 KiB prints as "<n>B".
pub fn format_size(bytes: u64) -> String {
    for &(suffix, unit) in UNITS.iter().rev() {
        if bytes >= unit {
            return format!(
                "{:.1}{}",
                bytes as f64 / unit as f64,
                suffix.to_ascii_uppercase()
            );
        }
    }

    format!("{bytes}B")
}
