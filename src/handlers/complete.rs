//! Completion handler for the task list MCP server

use crate::TasklistServerHandler;
use crate::tasklist::Session;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

fn state_name(completed: bool) -> &'static str {
    if completed { "done" } else { "open" }
}

impl TasklistServerHandler {
    /// Mark tasks complete or re-open them.
    ///
    /// IDs are processed in the given order, each against the children state
    /// left by the previous one, so `[child, parent]` completes both. A task
    /// with an incomplete direct child is refused and reported; the rest of
    /// the batch still applies.
    pub async fn handle_set_completed(
        &self,
        session: &Session,
        ids: Vec<String>,
        completed: bool,
    ) -> McpResult<String> {
        if ids.is_empty() {
            bail_public!(_, "No IDs provided. Please specify at least one task ID.");
        }

        let mut successes = Vec::new();
        let mut unchanged = Vec::new();
        let mut failures = Vec::new();

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        for id in ids.iter().map(|id| validation::normalize_id(id)) {
            match data.set_completed(&session.user, &id, completed) {
                Ok(true) => successes.push(id),
                Ok(false) => unchanged.push(id),
                Err(e) => {
                    tracing::warn!(user = %session.user, task_id = %id, error = %e, "completion refused");
                    failures.push(format!("{}: {}", id, e));
                }
            }
        }
        if !successes.is_empty() {
            self.persist(&mut data, snapshot)?;
        }
        drop(data);

        let mut response = String::new();

        if !successes.is_empty() {
            tracing::info!(user = %session.user, count = successes.len(), completed, "completion changed");
            response.push_str(&format!(
                "Successfully updated {} task{}:\n",
                successes.len(),
                if successes.len() == 1 { "" } else { "s" }
            ));
            for id in &successes {
                response.push_str(&format!(
                    "- {}: {} → {}\n",
                    id,
                    state_name(!completed),
                    state_name(completed)
                ));
            }
        }

        if !unchanged.is_empty() {
            if !response.is_empty() {
                response.push('\n');
            }
            for id in &unchanged {
                response.push_str(&format!("- {}: already {}\n", id, state_name(completed)));
            }
        }

        if !failures.is_empty() {
            if !response.is_empty() {
                response.push('\n');
            }
            response.push_str(&format!(
                "Failed to update {} task{}:\n",
                failures.len(),
                if failures.len() == 1 { "" } else { "s" }
            ));
            for failure in &failures {
                response.push_str(&format!("- {}\n", failure));
            }
        }

        // If every ID failed, report as an error
        if successes.is_empty() && unchanged.is_empty() {
            bail_public!(_, "{}", response.trim());
        }

        Ok(response.trim().to_string())
    }
}
