//! MCP tool handlers for the task list server
//!
//! Each handler takes the caller's `Session` explicitly and lives in its own
//! file.

pub mod announcement;
pub mod category;
pub mod complete;
pub mod delete;
pub mod feedback;
pub mod list;
pub mod task;
