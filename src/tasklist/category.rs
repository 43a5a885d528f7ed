use super::task::local_date_today;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user-defined grouping of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub owner: String,
    pub name: String,
    #[serde(default = "local_date_today")]
    pub created_at: NaiveDate,
}

impl Category {
    pub fn new(id: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            name: name.into(),
            created_at: local_date_today(),
        }
    }

    /// Category names compare case-insensitively within one owner
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
