//! List handler for the task list MCP server

use crate::TasklistServerHandler;
use crate::formatting;
use crate::tasklist::{Session, Task};
use crate::validation;
use mcp_attr::Result as McpResult;

impl TasklistServerHandler {
    /// Handles list/filter operations - applies filters, ranks by coefficient
    /// and formats results for display.
    pub async fn handle_list_tasks(
        &self,
        session: &Session,
        category: Option<String>,
        completed: Option<bool>,
        keyword: Option<String>,
        parent: Option<String>,
        exclude_description: Option<bool>,
    ) -> McpResult<String> {
        let data = self.lock_data()?;
        let mut tasks: Vec<Task> = data
            .tasks_for(&session.user)
            .into_iter()
            .cloned()
            .collect();
        let categories = data.categories_for(&session.user);

        if let Some(ref category_filter) = category {
            formatting::apply_category_filter(&mut tasks, &validation::normalize_id(category_filter));
        }

        if let Some(completed_filter) = completed {
            formatting::apply_completed_filter(&mut tasks, completed_filter);
        }

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut tasks, keyword_filter);
        }

        if let Some(ref parent_filter) = parent {
            formatting::apply_parent_filter(&mut tasks, &validation::normalize_id(parent_filter));
        }

        formatting::sort_by_coefficient(&mut tasks);

        Ok(formatting::format_tasks(
            &tasks,
            &categories,
            exclude_description.unwrap_or(false),
        ))
    }
}
