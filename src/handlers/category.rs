//! Category handlers for the task list MCP server

use crate::TasklistServerHandler;
use crate::formatting;
use crate::tasklist::Session;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TasklistServerHandler {
    pub async fn handle_add_category(&self, session: &Session, name: String) -> McpResult<String> {
        let name = validation::require_text("name", &name)?;

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let category = data
            .create_category(&session.user, &name)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(user = %session.user, category_id = %category.id, "category created");
        Ok(format!(
            "Category created with ID: {} (name: {})",
            category.id, category.name
        ))
    }

    pub async fn handle_rename_category(
        &self,
        session: &Session,
        id: String,
        name: String,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let name = validation::require_text("name", &name)?;

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let category = data
            .rename_category(&session.user, &id, &name)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        Ok(format!("Category {} renamed to {}", category.id, category.name))
    }

    /// Refused while any task still belongs to the category.
    pub async fn handle_delete_category(&self, session: &Session, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let category = data
            .delete_category(&session.user, &id)
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(user = %session.user, category_id = %category.id, "category deleted");
        Ok(format!("Category {} ({}) deleted", category.id, category.name))
    }

    pub async fn handle_list_categories(&self, session: &Session) -> McpResult<String> {
        let data = self.lock_data()?;
        let tasks = data.tasks_for(&session.user);
        let entries: Vec<_> = data
            .categories_for(&session.user)
            .into_iter()
            .map(|c| {
                let count = tasks
                    .iter()
                    .filter(|t| t.category_id.as_deref() == Some(c.id.as_str()))
                    .count();
                (c, count)
            })
            .collect();

        Ok(formatting::format_categories(&entries))
    }
}
