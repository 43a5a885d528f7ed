//! Line ending normalization for free-text fields
//!
//! TOML files edited on other platforms can carry `\r` sequences that get
//! unescaped to CR bytes during deserialization. They are folded to LF on
//! load.

use super::announcement::Announcement;
use super::feedback::Feedback;
use super::task::Task;

/// Normalize line endings in a string to LF (\n)
pub fn normalize_string_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn normalize_task_line_endings(tasks: &mut [Task]) {
    for task in tasks.iter_mut() {
        if let Some(description) = &task.description {
            task.description = Some(normalize_string_line_endings(description));
        }
    }
}

pub fn normalize_announcement_line_endings(announcements: &mut [Announcement]) {
    for announcement in announcements.iter_mut() {
        announcement.body = normalize_string_line_endings(&announcement.body);
    }
}

pub fn normalize_feedback_line_endings(feedback: &mut [Feedback]) {
    for item in feedback.iter_mut() {
        item.message = normalize_string_line_endings(&item.message);
        if let Some(note) = &item.admin_note {
            item.admin_note = Some(normalize_string_line_endings(note));
        }
    }
}
