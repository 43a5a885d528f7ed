//! Announcement handlers for the task list MCP server
//!
//! Publishing and deleting are admin-only. Everyone can list what is visible
//! to them and mark it as read.

use crate::TasklistServerHandler;
use crate::formatting;
use crate::tasklist::Session;
use crate::validation;
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};

impl TasklistServerHandler {
    /// Publish an announcement now, or schedule it with a future `published_at`.
    pub async fn handle_publish_announcement(
        &self,
        session: &Session,
        title: String,
        body: String,
        published_at: Option<String>,
    ) -> McpResult<String> {
        if let Err(msg) = session.require_admin("publish announcements") {
            bail_public!(_, "{}", msg);
        }
        let title = validation::require_text("title", &title)?;
        let body = validation::require_text("body", &body)?;
        let now = Utc::now();
        let published_at = validation::parse_published_at(published_at.as_deref(), now)?;

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let announcement = data.publish_announcement(&title, &body, published_at, now);
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(
            admin = %session.user,
            announcement_id = %announcement.id,
            published_at = %announcement.published_at,
            "announcement published"
        );

        let state = if announcement.is_published(now) {
            "published"
        } else {
            "scheduled"
        };
        Ok(format!(
            "Announcement {} with ID: {} (visible from {})",
            state,
            announcement.id,
            announcement.published_at.to_rfc3339()
        ))
    }

    pub async fn handle_delete_announcement(&self, session: &Session, id: String) -> McpResult<String> {
        if let Err(msg) = session.require_admin("delete announcements") {
            bail_public!(_, "{}", msg);
        }
        let id = validation::normalize_id(&id);

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let announcement = data
            .delete_announcement(&id)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(admin = %session.user, announcement_id = %announcement.id, "announcement deleted");
        Ok(format!("Announcement {} deleted", announcement.id))
    }

    pub async fn handle_list_announcements(
        &self,
        session: &Session,
        unread_only: Option<bool>,
    ) -> McpResult<String> {
        let now = Utc::now();
        let data = self.lock_data()?;
        let mut entries: Vec<_> = data
            .visible_announcements(session, now)
            .into_iter()
            .map(|a| (a, data.is_read(&a.id, &session.user)))
            .collect();

        if unread_only.unwrap_or(false) {
            entries.retain(|(_, read)| !read);
        }

        Ok(formatting::format_announcements(&entries, now))
    }

    pub async fn handle_mark_announcement_read(
        &self,
        session: &Session,
        id: String,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let newly = data
            .mark_read(session, &id, Utc::now())
            .map_err(validation::data_error)?;
        if newly {
            self.persist(&mut data, snapshot)?;
        }
        drop(data);

        if newly {
            Ok(format!("Announcement {} marked as read", id))
        } else {
            Ok(format!("Announcement {} was already read", id))
        }
    }
}
