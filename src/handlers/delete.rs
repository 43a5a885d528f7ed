//! Delete handler for the task list MCP server

use crate::TasklistServerHandler;
use crate::tasklist::Session;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TasklistServerHandler {
    /// Permanently delete tasks. A task that still has subtasks is refused;
    /// there is no cascading delete. IDs are processed in order, so list
    /// children before their parent.
    pub async fn handle_delete_task(&self, session: &Session, ids: Vec<String>) -> McpResult<String> {
        if ids.is_empty() {
            bail_public!(_, "No IDs provided. Please specify at least one task ID.");
        }

        let mut deleted = Vec::new();
        let mut failures = Vec::new();

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        for id in ids.iter().map(|id| validation::normalize_id(id)) {
            match data.delete_task(&session.user, &id) {
                Ok(task) => deleted.push(task),
                Err(e) => {
                    tracing::warn!(user = %session.user, task_id = %id, error = %e, "delete refused");
                    failures.push(format!("{}: {}", id, e));
                }
            }
        }
        if !deleted.is_empty() {
            self.persist(&mut data, snapshot)?;
        }
        drop(data);

        let mut response = String::new();

        if !deleted.is_empty() {
            tracing::info!(user = %session.user, count = deleted.len(), "tasks deleted");
            response.push_str(&format!(
                "Deleted {} task{}:\n",
                deleted.len(),
                if deleted.len() == 1 { "" } else { "s" }
            ));
            for task in &deleted {
                response.push_str(&format!("- {} ({})\n", task.id, task.title));
            }
        }

        if !failures.is_empty() {
            if !response.is_empty() {
                response.push('\n');
            }
            response.push_str(&format!(
                "Failed to delete {} task{}:\n",
                failures.len(),
                if failures.len() == 1 { "" } else { "s" }
            ));
            for failure in &failures {
                response.push_str(&format!("- {}\n", failure));
            }
        }

        if deleted.is_empty() {
            bail_public!(_, "{}", response.trim());
        }

        Ok(response.trim().to_string())
    }
}
