//! Task create/update handlers for the task list MCP server

use crate::TasklistServerHandler;
use crate::tasklist::{NewTask, Session, TaskChanges};
use crate::validation;
use mcp_attr::Result as McpResult;

/// `Some("  ")` and `None` both mean "not given" on create
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TasklistServerHandler {
    /// Create a task; omitted factors default to 1 and the coefficient is
    /// computed before the task is stored.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_task(
        &self,
        session: &Session,
        title: String,
        description: Option<String>,
        priority: Option<i64>,
        complexity: Option<i64>,
        length: Option<i64>,
        parent: Option<String>,
        category: Option<String>,
    ) -> McpResult<String> {
        let new = NewTask {
            title: validation::require_text("title", &title)?,
            description: optional_text(description),
            priority: validation::parse_factor("priority", priority)?,
            complexity: validation::parse_factor("complexity", complexity)?,
            length: validation::parse_factor("length", length)?,
            parent_id: optional_text(parent),
            category_id: optional_text(category),
        };

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let task = data
            .create_task(&session.user, new)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(
            user = %session.user,
            task_id = %task.id,
            coefficient = %task.coefficient,
            "task created"
        );

        Ok(format!(
            "Task created with ID: {} (coefficient: {})",
            task.id, task.coefficient
        ))
    }

    /// Update task details. Changing any factor recomputes the coefficient
    /// in the same write. Use "" to clear description, parent or category.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        session: &Session,
        id: String,
        title: Option<String>,
        description: Option<String>,
        priority: Option<i64>,
        complexity: Option<i64>,
        length: Option<i64>,
        parent: Option<String>,
        category: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let changes = TaskChanges {
            title: title
                .map(|t| validation::require_text("title", &t))
                .transpose()?,
            description: validation::optional_update(description),
            priority: validation::parse_factor("priority", priority)?,
            complexity: validation::parse_factor("complexity", complexity)?,
            length: validation::parse_factor("length", length)?,
            parent_id: validation::optional_update(parent),
            category_id: validation::optional_update(category),
        };

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let before = data.find_task(&session.user, &id).map(|t| t.coefficient);
        let task = data
            .update_task(&session.user, &id, changes)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(user = %session.user, task_id = %task.id, "task updated");

        match before {
            Some(old) if old != task.coefficient => Ok(format!(
                "Task {} updated successfully (coefficient: {} → {})",
                task.id, old, task.coefficient
            )),
            _ => Ok(format!(
                "Task {} updated successfully (coefficient: {})",
                task.id, task.coefficient
            )),
        }
    }
}
