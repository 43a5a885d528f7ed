//! Validation helper functions for the task list MCP server
//!
//! Everything a tool receives is checked here before it reaches the store:
//! factor ranges, timestamps, status names and the `""` = clear convention.

use crate::tasklist::{DataError, Factor, FeedbackStatus};
use chrono::{DateTime, NaiveDate, Utc};
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Convert a store error into a client-visible MCP error
pub fn data_error(err: DataError) -> mcp_attr::Error {
    invalid_params(err.to_string())
}

/// Validate an optional factor parameter
///
/// Out-of-range values are rejected, never clamped.
///
/// # Arguments
/// * `field` - Parameter name used in the error message
/// * `value` - Raw value supplied by the client
pub fn parse_factor(field: &'static str, value: Option<i64>) -> McpResult<Option<Factor>> {
    value
        .map(|v| Factor::for_field(field, v).map_err(|e| invalid_params(e.to_string())))
        .transpose()
}

/// Parse a publication timestamp
///
/// Accepts RFC 3339 (`2025-03-15T09:00:00Z`) or a bare date, which means
/// midnight UTC. `None` means "now".
pub fn parse_published_at(value: Option<&str>, now: DateTime<Utc>) -> McpResult<DateTime<Utc>> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(now);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(invalid_params(format!(
        "Invalid published_at '{}'. Use RFC 3339 (e.g., '2025-03-15T09:00:00Z') or YYYY-MM-DD",
        raw
    )))
}

/// Parse and validate a feedback status parameter
pub fn parse_feedback_status(status_str: &str) -> McpResult<FeedbackStatus> {
    status_str.trim().parse::<FeedbackStatus>().map_err(invalid_params)
}

/// Interpret an optional update parameter where `""` clears the field
///
/// `None` → leave unchanged, `Some("")` → clear, `Some(v)` → set to `v`.
pub fn optional_update(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Reject blank required text parameters
pub fn require_text(field: &str, value: &str) -> McpResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(invalid_params(format!("{} must not be empty", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trim whitespace around a client-supplied ID
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}
