//! Feedback handlers for the task list MCP server

use crate::TasklistServerHandler;
use crate::formatting;
use crate::tasklist::Session;
use crate::validation;
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};

impl TasklistServerHandler {
    pub async fn handle_submit_feedback(
        &self,
        session: &Session,
        subject: String,
        message: String,
    ) -> McpResult<String> {
        let subject = validation::require_text("subject", &subject)?;
        let message = validation::require_text("message", &message)?;

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let feedback = data.submit_feedback(&session.user, &subject, &message, Utc::now());
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(user = %session.user, feedback_id = %feedback.id, "feedback submitted");
        Ok(format!("Feedback submitted with ID: {}", feedback.id))
    }

    /// Admins see every item and may filter by status; users see their own.
    pub async fn handle_list_feedback(
        &self,
        session: &Session,
        status: Option<String>,
    ) -> McpResult<String> {
        let status_filter = if let Some(ref status_str) = status {
            Some(validation::parse_feedback_status(status_str)?)
        } else {
            None
        };

        let data = self.lock_data()?;
        let items = data.feedback_for(session, status_filter);
        Ok(formatting::format_feedback(&items))
    }

    /// Change the triage status of a feedback item. `note` = "" clears it.
    pub async fn handle_triage_feedback(
        &self,
        session: &Session,
        id: String,
        status: String,
        note: Option<String>,
    ) -> McpResult<String> {
        if let Err(msg) = session.require_admin("triage feedback") {
            bail_public!(_, "{}", msg);
        }
        let id = validation::normalize_id(&id);
        let status = validation::parse_feedback_status(&status)?;

        let mut data = self.lock_data()?;
        let snapshot = data.clone();
        let feedback = data
            .triage_feedback(&id, status, validation::optional_update(note), Utc::now())
            .map_err(validation::data_error)?;
        self.persist(&mut data, snapshot)?;
        drop(data);

        tracing::info!(
            admin = %session.user,
            feedback_id = %feedback.id,
            status = ?feedback.status,
            "feedback triaged"
        );
        Ok(format!(
            "Feedback {} status changed to {:?}",
            feedback.id, feedback.status
        ))
    }
}
