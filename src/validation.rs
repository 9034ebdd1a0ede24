//! Input validation for user-supplied IDs, free text, dates and stages.
//!
//! School and interaction IDs become file names under `.funnel/`, so they are
//! checked before any path is built from them.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime};

use crate::models::clock_time;
use crate::models::role::Role;
use crate::models::stage::FunnelStage;

/// Maximum allowed length for school, employee and interaction IDs.
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum allowed length for interaction comments.
pub const MAX_COMMENTS_LENGTH: usize = 2000;

/// Reserved names that cannot be used as IDs (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates that an ID is safe for use in file paths.
///
/// An ID is valid if it is non-empty, at most [`MAX_ID_LENGTH`] characters, made of
/// alphanumerics, dashes and underscores, and not a reserved system name.
///
/// ```
/// use funnel::validation::validate_id;
///
/// assert!(validate_id("school-001").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("../etc/passwd").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("ID cannot be empty");
    }

    if id.len() > MAX_ID_LENGTH {
        bail!(
            "ID too long: {} characters (max {})",
            id.len(),
            MAX_ID_LENGTH
        );
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        bail!("ID '{id}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    let id_lower = id.to_lowercase();
    if RESERVED_NAMES.contains(&id_lower.as_str()) {
        bail!("ID '{id}' uses a reserved name");
    }

    Ok(())
}

pub fn validate_comments(comments: &str) -> Result<()> {
    if comments.chars().count() > MAX_COMMENTS_LENGTH {
        bail!(
            "Comments too long: {} characters (max {})",
            comments.chars().count(),
            MAX_COMMENTS_LENGTH
        );
    }

    Ok(())
}

/// Clap value parser for ID arguments.
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for comment arguments.
pub fn clap_comments_validator(s: &str) -> Result<String, String> {
    validate_comments(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for funnel stages (`awareness`, ..., `decision_no`).
pub fn clap_stage_parser(s: &str) -> Result<FunnelStage, String> {
    s.parse().map_err(|e: crate::error::FunnelError| e.to_string())
}

pub fn clap_role_parser(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: crate::error::FunnelError| e.to_string())
}

/// Clap value parser for `YYYY-MM-DD` dates.
pub fn clap_date_parser(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Clap value parser for `HH:MM` times.
pub fn clap_time_parser(s: &str) -> Result<NaiveTime, String> {
    clock_time::parse(s).map_err(|e| format!("Invalid time '{s}' (expected HH:MM): {e}"))
}
