//! Serialization and deserialization implementations for TasklistData
//!
//! On load the task index is rebuilt, free-text line endings are normalized
//! and every stored coefficient is recomputed from its factors.

use super::announcement::{Announcement, ReadMark};
use super::category::Category;
use super::feedback::Feedback;
use super::normalize::{
    normalize_announcement_line_endings, normalize_feedback_line_endings,
    normalize_task_line_endings,
};
use super::task::Task;
use super::tasklist_data::{FORMAT_VERSION, TasklistData};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

/// On-disk shape of the data file
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TasklistDataHelper {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    task_counter: u32,
    #[serde(default)]
    category_counter: u32,
    #[serde(default)]
    announcement_counter: u32,
    #[serde(default)]
    feedback_counter: u32,
    #[serde(default)]
    task: Vec<Task>,
    #[serde(default)]
    category: Vec<Category>,
    #[serde(default)]
    announcement: Vec<Announcement>,
    #[serde(default)]
    read_mark: Vec<ReadMark>,
    #[serde(default)]
    feedback: Vec<Feedback>,
}

impl<'de> Deserialize<'de> for TasklistData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let helper = TasklistDataHelper::deserialize(deserializer)?;

        if helper.format_version > FORMAT_VERSION {
            return Err(serde::de::Error::custom(format!(
                "unsupported format_version {} (this build reads up to {})",
                helper.format_version, FORMAT_VERSION
            )));
        }

        let mut tasks = helper.task;
        let mut announcements = helper.announcement;
        let mut feedback = helper.feedback;

        normalize_task_line_endings(&mut tasks);
        normalize_announcement_line_endings(&mut announcements);
        normalize_feedback_line_endings(&mut feedback);

        // The coefficient is a pure function of the factors; a hand-edited
        // file must not be able to make them disagree.
        for task in &mut tasks {
            let stored = task.coefficient;
            if task.recompute_coefficient() {
                tracing::warn!(
                    task_id = %task.id,
                    stored = %stored,
                    recomputed = %task.coefficient,
                    "coefficient drift repaired on load"
                );
            }
        }

        let mut task_map = HashMap::new();
        for task in &tasks {
            if task.id.trim().is_empty() || task.owner.trim().is_empty() {
                return Err(serde::de::Error::custom(format!(
                    "task '{}' has an empty id or owner",
                    task.title
                )));
            }
            if task_map
                .insert(task.id.clone(), task.owner.clone())
                .is_some()
            {
                return Err(serde::de::Error::custom(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
        }

        Ok(TasklistData {
            format_version: FORMAT_VERSION,
            tasks,
            task_map,
            categories: helper.category,
            announcements,
            read_marks: helper.read_mark,
            feedback,
            task_counter: helper.task_counter,
            category_counter: helper.category_counter,
            announcement_counter: helper.announcement_counter,
            feedback_counter: helper.feedback_counter,
        })
    }
}

impl Serialize for TasklistData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("TasklistData", 10)?;
        state.serialize_field("format_version", &self.format_version)?;

        // Scalars first so they stay above the array tables in TOML
        if self.task_counter != 0 {
            state.serialize_field("task_counter", &self.task_counter)?;
        }
        if self.category_counter != 0 {
            state.serialize_field("category_counter", &self.category_counter)?;
        }
        if self.announcement_counter != 0 {
            state.serialize_field("announcement_counter", &self.announcement_counter)?;
        }
        if self.feedback_counter != 0 {
            state.serialize_field("feedback_counter", &self.feedback_counter)?;
        }

        if !self.tasks.is_empty() {
            state.serialize_field("task", &self.tasks)?;
        }
        if !self.categories.is_empty() {
            state.serialize_field("category", &self.categories)?;
        }
        if !self.announcements.is_empty() {
            state.serialize_field("announcement", &self.announcements)?;
        }
        if !self.read_marks.is_empty() {
            state.serialize_field("read_mark", &self.read_marks)?;
        }
        if !self.feedback.is_empty() {
            state.serialize_field("feedback", &self.feedback)?;
        }

        state.end()
    }
}
