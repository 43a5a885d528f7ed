//! Master Tasklist MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for personal,
//! hierarchical task lists. Every task carries three factors (priority,
//! complexity, length) from which a ranking coefficient is derived, and tasks
//! form trees whose integrity rules gate completion and deletion.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TasklistServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `tasklist` module - Coefficient engine, tree rules and the data store
//! - **Persistence Layer**: `storage` module - File-based TOML storage
//!
//! # Example
//!
//! ```no_run
//! use master_tasklist::{Session, TasklistServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TasklistServerHandler::new("tasks.toml", Session::user("alice"))?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod storage;
pub mod tasklist;
pub mod validation;

use anyhow::Result;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail_public};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

// Re-export commonly used types
pub use storage::Storage;
pub use tasklist::{
    Coefficient, DataError, Factor, FeedbackStatus, Role, Session, Task, TasklistData, TreeError,
    can_complete, can_delete, compute_coefficient,
};

/// MCP Server handler for task list management
///
/// Holds the whole data set behind one mutex. Every mutating handler checks,
/// writes and persists while holding it, so a gate decision can never be
/// invalidated between the check and the write.
pub struct TasklistServerHandler {
    pub(crate) data: Mutex<TasklistData>,
    pub(crate) storage: Storage,
    pub(crate) session: Session,
}

impl TasklistServerHandler {
    /// Create a new server handler
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (TOML format)
    /// * `session` - Identity the MCP tools act as
    ///
    /// # Example
    /// ```no_run
    /// # use master_tasklist::{Session, TasklistServerHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TasklistServerHandler::new("tasks.toml", Session::admin("root"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: impl AsRef<Path>, session: Session) -> Result<Self> {
        let storage = Storage::new(storage_path);
        let data = Mutex::new(storage.load()?);
        tracing::info!(
            path = %storage.file_path().display(),
            session = %session,
            "task list opened"
        );
        Ok(Self {
            data,
            storage,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub(crate) fn lock_data(&self) -> McpResult<MutexGuard<'_, TasklistData>> {
        let Ok(guard) = self.data.lock() else {
            bail_public!(
                _,
                "Internal error: task data is unavailable after an earlier failure. Restart the server."
            );
        };
        Ok(guard)
    }

    /// Write the current data to disk; called with the data lock held
    ///
    /// On failure `data` is put back to `snapshot`, the state taken before
    /// the change, so memory never runs ahead of the file.
    pub(crate) fn persist(&self, data: &mut TasklistData, snapshot: TasklistData) -> McpResult<()> {
        if let Err(e) = self.storage.save(data) {
            tracing::error!(error = %e, "failed to save data file, change rolled back");
            *data = snapshot;
            bail_public!(_, "Failed to save: {}", e);
        }
        Ok(())
    }
}

/// Personal task list with ranked, hierarchical tasks.
///
/// Each task has three factors from 1 to 5:
/// - **priority**: urgency (5 = most urgent)
/// - **complexity**: difficulty (5 = hardest)
/// - **length**: expected duration (5 = longest)
///
/// The **coefficient** = priority + (5 - complexity) + (5 - length), from 1 to 13.
/// Work on the highest coefficient first: urgent, easy, short tasks rank highest.
///
/// Tasks can have subtasks (set `parent`). Rules:
/// - A task cannot be completed while any direct subtask is still open.
/// - A task cannot be deleted while it still has subtasks.
///
/// Task IDs are assigned by the server: task-1, task-2, ...
/// Category IDs: cat-1, ...; announcements: ann-1, ...; feedback: fb-1, ...
#[mcp_server]
impl McpServer for TasklistServerHandler {
    /// **Add**: Create a task. Factors default to 1. Returns the new ID and coefficient.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_task(
        &self,
        /// Title: brief description
        title: String,
        /// Description: Markdown details (optional)
        description: Option<String>,
        /// Priority 1-5, 5 = most urgent (optional, default 1)
        priority: Option<i64>,
        /// Complexity 1-5, 5 = hardest (optional, default 1)
        complexity: Option<i64>,
        /// Length 1-5, 5 = longest (optional, default 1)
        length: Option<i64>,
        /// Parent task ID to make this a subtask (optional)
        parent: Option<String>,
        /// Category ID (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(
            &self.session,
            title,
            description,
            priority,
            complexity,
            length,
            parent,
            category,
        )
        .await
    }

    /// **Update**: Change task details. Changing a factor recomputes the coefficient.
    /// **Tip**: Use ""(empty string) to clear description, parent or category.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_task(
        &self,
        /// ID of task to update
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
        /// New priority 1-5 (optional)
        priority: Option<i64>,
        /// New complexity 1-5 (optional)
        complexity: Option<i64>,
        /// New length 1-5 (optional)
        length: Option<i64>,
        /// New parent task ID, ""=make top-level (optional)
        parent: Option<String>,
        /// New category ID, ""=clear (optional)
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(
            &self.session,
            id,
            title,
            description,
            priority,
            complexity,
            length,
            parent,
            category,
        )
        .await
    }

    /// **Complete/Reopen**: Mark tasks done (completed=true) or open again (completed=false).
    /// **Rule**: A task with open subtasks cannot be completed - complete the subtasks first.
    /// **Batch**: IDs are processed in order, so list subtasks before their parent.
    #[tool]
    async fn set_completed(
        &self,
        /// Task IDs to update
        ids: Vec<String>,
        /// true = done, false = open
        completed: bool,
    ) -> McpResult<String> {
        self.handle_set_completed(&self.session, ids, completed).await
    }

    /// **Delete**: Permanently delete tasks. A task with subtasks cannot be deleted -
    /// delete or move the subtasks first. IDs are processed in order.
    #[tool]
    async fn delete_task(
        &self,
        /// Task IDs to delete
        ids: Vec<String>,
    ) -> McpResult<String> {
        self.handle_delete_task(&self.session, ids).await
    }

    /// **Review**: List your tasks ranked by coefficient (highest first).
    #[tool]
    async fn list_tasks(
        &self,
        /// Only tasks in this category ID (optional)
        category: Option<String>,
        /// Only done (true) or open (false) tasks (optional)
        completed: Option<bool>,
        /// Case-insensitive search in ID, title and description (optional)
        keyword: Option<String>,
        /// Only direct subtasks of this task ID; ""=top-level tasks only (optional)
        parent: Option<String>,
        /// Leave descriptions out of the output (optional)
        exclude_description: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list_tasks(
            &self.session,
            category,
            completed,
            keyword,
            parent,
            exclude_description,
        )
        .await
    }

    /// **Categories**: Create a category to group tasks.
    #[tool]
    async fn add_category(
        &self,
        /// Category name, unique per user (case-insensitive)
        name: String,
    ) -> McpResult<String> {
        self.handle_add_category(&self.session, name).await
    }

    /// **Categories**: Rename a category.
    #[tool]
    async fn rename_category(
        &self,
        /// Category ID
        id: String,
        /// New name
        name: String,
    ) -> McpResult<String> {
        self.handle_rename_category(&self.session, id, name).await
    }

    /// **Categories**: Delete a category. Refused while tasks still use it.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_category(&self.session, id).await
    }

    /// **Categories**: List your categories with task counts.
    #[tool]
    async fn list_categories(&self) -> McpResult<String> {
        self.handle_list_categories(&self.session).await
    }

    /// **Admin**: Publish an announcement to all users, or schedule it for later.
    #[tool]
    async fn publish_announcement(
        &self,
        /// Title
        title: String,
        /// Body text
        body: String,
        /// When it becomes visible: RFC 3339 or YYYY-MM-DD, default now (optional)
        published_at: Option<String>,
    ) -> McpResult<String> {
        self.handle_publish_announcement(&self.session, title, body, published_at)
            .await
    }

    /// **Admin**: Delete an announcement.
    #[tool]
    async fn delete_announcement(
        &self,
        /// Announcement ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_announcement(&self.session, id).await
    }

    /// **Announcements**: List announcements visible to you with read state.
    #[tool]
    async fn list_announcements(
        &self,
        /// Only unread announcements (optional)
        unread_only: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list_announcements(&self.session, unread_only)
            .await
    }

    /// **Announcements**: Mark an announcement as read.
    #[tool]
    async fn mark_announcement_read(
        &self,
        /// Announcement ID
        id: String,
    ) -> McpResult<String> {
        self.handle_mark_announcement_read(&self.session, id).await
    }

    /// **Feedback**: Send feedback to the administrators.
    #[tool]
    async fn submit_feedback(
        &self,
        /// Short subject
        subject: String,
        /// Message
        message: String,
    ) -> McpResult<String> {
        self.handle_submit_feedback(&self.session, subject, message)
            .await
    }

    /// **Feedback**: List feedback. Admins see all, users their own.
    #[tool]
    async fn list_feedback(
        &self,
        /// Status filter: open/in_progress/resolved/dismissed (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_feedback(&self.session, status).await
    }

    /// **Admin**: Triage a feedback item by changing its status.
    #[tool]
    async fn triage_feedback(
        &self,
        /// Feedback ID
        id: String,
        /// New status: open/in_progress/resolved/dismissed
        status: String,
        /// Note for the author, ""=clear (optional)
        note: Option<String>,
    ) -> McpResult<String> {
        self.handle_triage_feedback(&self.session, id, status, note)
            .await
    }
}
