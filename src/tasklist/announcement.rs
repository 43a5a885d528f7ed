use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message published by an administrator to all users
///
/// Announcements with a future `published_at` are scheduled: administrators
/// see them, regular users do not until the timestamp passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.published_at <= now
    }
}

/// Join record: `user` has read `announcement_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadMark {
    pub announcement_id: String,
    pub user: String,
}
