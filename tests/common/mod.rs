//! Common test utilities for integration tests
#![allow(dead_code)]

use master_tasklist::{Session, TasklistServerHandler};
use tempfile::{NamedTempFile, TempDir};

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (TasklistServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = TasklistServerHandler::new(temp_file.path(), Session::user("alice")).unwrap();
    (handler, temp_file)
}

/// Create a handler whose data file can never be written
pub fn get_unwritable_handler() -> (TasklistServerHandler, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing_dir").join("tasks.toml");
    let handler = TasklistServerHandler::new(path, Session::user("alice")).unwrap();
    (handler, dir)
}

pub fn alice() -> Session {
    Session::user("alice")
}

pub fn bob() -> Session {
    Session::user("bob")
}

pub fn admin() -> Session {
    Session::admin("root")
}

/// The client-visible message of a handler error
pub fn error_message(err: &mcp_attr::Error) -> String {
    err.to_error_object(false).message
}

/// Extract the ID from a creation response
/// Response format: "... with ID: <id> (...)" or "... with ID: <id>"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        let end = id_part.find(" (").unwrap_or(id_part.len());
        return id_part[..end].trim().to_string();
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_end_matches(')')
        .to_string()
}

/// Add a task with the given factors and optional parent, returning its ID
pub async fn add_task(
    handler: &TasklistServerHandler,
    session: &Session,
    title: &str,
    factors: (i64, i64, i64),
    parent: Option<&str>,
) -> String {
    let response = handler
        .handle_add_task(
            session,
            title.to_string(),
            None,
            Some(factors.0),
            Some(factors.1),
            Some(factors.2),
            parent.map(str::to_string),
            None,
        )
        .await
        .unwrap();
    extract_id_from_response(&response)
}
