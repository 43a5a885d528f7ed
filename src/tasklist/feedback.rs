use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Triage state of a feedback item
///
/// Uses snake_case naming to match TOML serialization format.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackStatus {
    /// Not yet looked at
    open,
    /// Acknowledged, being worked on
    in_progress,
    /// Addressed
    resolved,
    /// Closed without action
    dismissed,
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(FeedbackStatus::open),
            "in_progress" => Ok(FeedbackStatus::in_progress),
            "resolved" => Ok(FeedbackStatus::resolved),
            "dismissed" => Ok(FeedbackStatus::dismissed),
            _ => Err(format!(
                "Invalid feedback status '{}'. Valid options are: open, in_progress, resolved, dismissed",
                s
            )),
        }
    }
}

/// A message from a user to the administrators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feedback {
    pub id: String,
    pub author: String,
    pub subject: String,
    pub message: String,
    pub status: FeedbackStatus,
    /// Note left by the administrator during triage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
