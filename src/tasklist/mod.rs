//! Task list domain models and business logic
//!
//! - `coefficient`: coefficient formula and the completion/deletion gates
//! - `task`: the task entity
//! - `tasklist_data`: main data container with all store operations
//! - `category`, `announcement`, `feedback`: the remaining entities
//! - `session`: request-scoped identity and role check
//! - `serde_impl` / `normalize`: TOML load and save

mod announcement;
mod category;
mod coefficient;
mod feedback;
mod normalize;
mod serde_impl;
mod session;
mod task;
mod tasklist_data;

// Re-export all public types
pub use announcement::{Announcement, ReadMark};
pub use category::Category;
pub use coefficient::{
    Coefficient, FACTOR_MAX, FACTOR_MIN, Factor, TreeError, can_complete, can_delete,
    compute_coefficient,
};
pub use feedback::{Feedback, FeedbackStatus};
pub use session::{Role, Session};
pub use task::{Task, local_date_today};
pub use tasklist_data::{DataError, FORMAT_VERSION, NewTask, TaskChanges, TasklistData};
