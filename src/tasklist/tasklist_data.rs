use super::announcement::{Announcement, ReadMark};
use super::category::Category;
use super::coefficient::{Factor, TreeError, can_complete, can_delete};
use super::feedback::{Feedback, FeedbackStatus};
use super::session::Session;
use super::task::{Task, local_date_today};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised by store operations
///
/// Lookups are scoped to the caller, so a task owned by someone else is
/// reported as not found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Task '{0}' does not exist. Use list_tasks() to see available tasks.")]
    TaskNotFound(String),

    #[error("Parent task '{0}' does not exist.")]
    ParentNotFound(String),

    #[error(
        "Task '{task_id}' cannot be moved under '{parent_id}': that would make it its own ancestor."
    )]
    ParentCycle { task_id: String, parent_id: String },

    #[error(
        "Parent task '{0}' is already completed. Reopen it first or choose another parent."
    )]
    ParentCompleted(String),

    #[error("Category '{0}' does not exist.")]
    CategoryNotFound(String),

    #[error("Category named '{0}' already exists.")]
    DuplicateCategory(String),

    #[error(
        "Category '{id}' is still used by {count} task(s). Move those tasks to another category first."
    )]
    CategoryInUse { id: String, count: usize },

    #[error("Announcement '{0}' does not exist.")]
    AnnouncementNotFound(String),

    #[error("Feedback '{0}' does not exist.")]
    FeedbackNotFound(String),

    #[error("{0}")]
    Tree(#[from] TreeError),
}

/// Fields supplied when creating a task; omitted factors default to 1
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Factor>,
    pub complexity: Option<Factor>,
    pub length: Option<Factor>,
    pub parent_id: Option<String>,
    pub category_id: Option<String>,
}

/// Partial update of a task
///
/// For the nested options, `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Factor>,
    pub complexity: Option<Factor>,
    pub length: Option<Factor>,
    pub parent_id: Option<Option<String>>,
    pub category_id: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct TasklistData {
    /// Format version for the TOML file
    pub format_version: u32,

    /// All tasks in insertion order
    ///
    /// A Vec keeps TOML output stable between saves and gives creation order
    /// as the tie-breaker when sorting by coefficient.
    pub(crate) tasks: Vec<Task>,

    /// Task ID → owner, for O(1) duplicate and existence checks
    ///
    /// Not serialized; rebuilt from `tasks` on load.
    pub(crate) task_map: HashMap<String, String>,

    pub(crate) categories: Vec<Category>,
    pub(crate) announcements: Vec<Announcement>,
    pub(crate) read_marks: Vec<ReadMark>,
    pub(crate) feedback: Vec<Feedback>,

    pub task_counter: u32,
    pub category_counter: u32,
    pub announcement_counter: u32,
    pub feedback_counter: u32,
}

impl Default for TasklistData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tasks: Vec::new(),
            task_map: HashMap::new(),
            categories: Vec::new(),
            announcements: Vec::new(),
            read_marks: Vec::new(),
            feedback: Vec::new(),
            task_counter: 0,
            category_counter: 0,
            announcement_counter: 0,
            feedback_counter: 0,
        }
    }
}

// Serialize/Deserialize implementations are in serde_impl.rs

impl TasklistData {
    /// Create a new empty TasklistData instance
    pub fn new() -> Self {
        Self::default()
    }

    fn next_task_id(&mut self) -> String {
        loop {
            self.task_counter += 1;
            let id = format!("task-{}", self.task_counter);
            if !self.task_map.contains_key(&id) {
                return id;
            }
        }
    }

    fn next_category_id(&mut self) -> String {
        loop {
            self.category_counter += 1;
            let id = format!("cat-{}", self.category_counter);
            if !self.categories.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    fn next_announcement_id(&mut self) -> String {
        loop {
            self.announcement_counter += 1;
            let id = format!("ann-{}", self.announcement_counter);
            if !self.announcements.iter().any(|a| a.id == id) {
                return id;
            }
        }
    }

    fn next_feedback_id(&mut self) -> String {
        loop {
            self.feedback_counter += 1;
            let id = format!("fb-{}", self.feedback_counter);
            if !self.feedback.iter().any(|f| f.id == id) {
                return id;
            }
        }
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Count all tasks across all owners
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Find a task owned by `owner`
    pub fn find_task(&self, owner: &str, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id && t.owner == owner)
    }

    fn find_task_mut(&mut self, owner: &str, id: &str) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id && t.owner == owner)
    }

    /// All tasks of one owner, in creation order
    pub fn tasks_for(&self, owner: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.owner == owner).collect()
    }

    /// Direct children of a task (one level, not transitive)
    pub fn children_of(&self, id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_child_of(id)).collect()
    }

    /// Insert a task as-is, keeping the index in sync
    ///
    /// Callers are expected to have checked the ID for duplicates.
    pub fn insert_task(&mut self, mut task: Task) {
        task.recompute_coefficient();
        self.task_map.insert(task.id.clone(), task.owner.clone());
        self.tasks.push(task);
    }

    fn check_parent(&self, owner: &str, parent_id: &str) -> Result<(), DataError> {
        match self.task_map.get(parent_id) {
            Some(parent_owner) if parent_owner == owner => Ok(()),
            _ => Err(DataError::ParentNotFound(parent_id.to_string())),
        }
    }

    /// An open task may not hang under a completed parent
    fn check_parent_open(&self, parent_id: &str) -> Result<(), DataError> {
        if self.tasks.iter().any(|t| t.id == parent_id && t.completed) {
            Err(DataError::ParentCompleted(parent_id.to_string()))
        } else {
            Ok(())
        }
    }

    fn check_category(&self, owner: &str, category_id: &str) -> Result<(), DataError> {
        if self
            .categories
            .iter()
            .any(|c| c.id == category_id && c.owner == owner)
        {
            Ok(())
        } else {
            Err(DataError::CategoryNotFound(category_id.to_string()))
        }
    }

    /// Would attaching `task_id` under `parent_id` create a cycle?
    fn creates_cycle(&self, task_id: &str, parent_id: &str) -> bool {
        let mut cursor = Some(parent_id.to_string());
        let mut steps = 0;
        while let Some(current) = cursor {
            if current == task_id {
                return true;
            }
            // a corrupted file could already contain a loop
            steps += 1;
            if steps > self.tasks.len() {
                return true;
            }
            cursor = self
                .tasks
                .iter()
                .find(|t| t.id == current)
                .and_then(|t| t.parent_id.clone());
        }
        false
    }

    /// Create a task for `owner` and return a copy of it
    pub fn create_task(&mut self, owner: &str, new: NewTask) -> Result<Task, DataError> {
        if let Some(ref parent_id) = new.parent_id {
            self.check_parent(owner, parent_id)?;
            self.check_parent_open(parent_id)?;
        }
        if let Some(ref category_id) = new.category_id {
            self.check_category(owner, category_id)?;
        }

        let id = self.next_task_id();
        let mut task = Task::new(
            id,
            owner,
            new.title,
            new.priority.unwrap_or_default(),
            new.complexity.unwrap_or_default(),
            new.length.unwrap_or_default(),
        );
        task.description = new.description;
        task.parent_id = new.parent_id;
        task.category_id = new.category_id;

        self.insert_task(task.clone());
        Ok(task)
    }

    /// Apply a partial update and return the updated task
    ///
    /// The coefficient is recomputed in the same write whenever a factor
    /// changes.
    pub fn update_task(
        &mut self,
        owner: &str,
        id: &str,
        changes: TaskChanges,
    ) -> Result<Task, DataError> {
        let Some(current) = self.find_task(owner, id) else {
            return Err(DataError::TaskNotFound(id.to_string()));
        };
        let completed = current.completed;
        if let Some(Some(ref parent_id)) = changes.parent_id {
            self.check_parent(owner, parent_id)?;
            if !completed {
                self.check_parent_open(parent_id)?;
            }
            if self.creates_cycle(id, parent_id) {
                return Err(DataError::ParentCycle {
                    task_id: id.to_string(),
                    parent_id: parent_id.clone(),
                });
            }
        }
        if let Some(Some(ref category_id)) = changes.category_id {
            self.check_category(owner, category_id)?;
        }

        let task = self
            .find_task_mut(owner, id)
            .ok_or_else(|| DataError::TaskNotFound(id.to_string()))?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(parent_id) = changes.parent_id {
            task.parent_id = parent_id;
        }
        if let Some(category_id) = changes.category_id {
            task.category_id = category_id;
        }
        task.set_factors(changes.priority, changes.complexity, changes.length);
        task.updated_at = local_date_today();

        Ok(task.clone())
    }

    /// Set the completion flag of a task
    ///
    /// Completing is gated on the current state of the direct children; the
    /// check and the write happen under the same `&mut self` borrow.
    /// Re-opening is always allowed. Returns true if the flag changed.
    pub fn set_completed(
        &mut self,
        owner: &str,
        id: &str,
        completed: bool,
    ) -> Result<bool, DataError> {
        if self.find_task(owner, id).is_none() {
            return Err(DataError::TaskNotFound(id.to_string()));
        }
        if completed {
            can_complete(id, &self.children_of(id))?;
        }

        let task = self
            .find_task_mut(owner, id)
            .ok_or_else(|| DataError::TaskNotFound(id.to_string()))?;
        if task.completed == completed {
            return Ok(false);
        }
        task.completed = completed;
        task.updated_at = local_date_today();
        Ok(true)
    }

    /// Delete a task that has no children and return it
    pub fn delete_task(&mut self, owner: &str, id: &str) -> Result<Task, DataError> {
        if self.find_task(owner, id).is_none() {
            return Err(DataError::TaskNotFound(id.to_string()));
        }
        can_delete(id, &self.children_of(id))?;

        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id && t.owner == owner)
            .ok_or_else(|| DataError::TaskNotFound(id.to_string()))?;
        let task = self.tasks.remove(pos);
        self.task_map.remove(id);
        Ok(task)
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn categories_for(&self, owner: &str) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.owner == owner).collect()
    }

    pub fn find_category(&self, owner: &str, id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id && c.owner == owner)
    }

    fn name_taken(&self, owner: &str, name: &str, except: Option<&str>) -> bool {
        self.categories
            .iter()
            .any(|c| c.owner == owner && c.has_name(name) && Some(c.id.as_str()) != except)
    }

    pub fn create_category(&mut self, owner: &str, name: &str) -> Result<Category, DataError> {
        let name = name.trim();
        if self.name_taken(owner, name, None) {
            return Err(DataError::DuplicateCategory(name.to_string()));
        }
        let id = self.next_category_id();
        let category = Category::new(id, owner, name);
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn rename_category(
        &mut self,
        owner: &str,
        id: &str,
        name: &str,
    ) -> Result<Category, DataError> {
        let name = name.trim();
        if self.find_category(owner, id).is_none() {
            return Err(DataError::CategoryNotFound(id.to_string()));
        }
        if self.name_taken(owner, name, Some(id)) {
            return Err(DataError::DuplicateCategory(name.to_string()));
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.owner == owner)
            .ok_or_else(|| DataError::CategoryNotFound(id.to_string()))?;
        category.name = name.to_string();
        Ok(category.clone())
    }

    /// Delete a category no task refers to
    pub fn delete_category(&mut self, owner: &str, id: &str) -> Result<Category, DataError> {
        if self.find_category(owner, id).is_none() {
            return Err(DataError::CategoryNotFound(id.to_string()));
        }
        let count = self
            .tasks
            .iter()
            .filter(|t| t.category_id.as_deref() == Some(id))
            .count();
        if count > 0 {
            return Err(DataError::CategoryInUse {
                id: id.to_string(),
                count,
            });
        }
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id && c.owner == owner)
            .ok_or_else(|| DataError::CategoryNotFound(id.to_string()))?;
        Ok(self.categories.remove(pos))
    }

    // ------------------------------------------------------------------
    // Announcements
    // ------------------------------------------------------------------

    pub fn publish_announcement(
        &mut self,
        title: &str,
        body: &str,
        published_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Announcement {
        let id = self.next_announcement_id();
        let announcement = Announcement {
            id,
            title: title.to_string(),
            body: body.to_string(),
            published_at,
            created_at: now,
        };
        self.announcements.push(announcement.clone());
        announcement
    }

    /// Delete an announcement together with its read marks
    pub fn delete_announcement(&mut self, id: &str) -> Result<Announcement, DataError> {
        let pos = self
            .announcements
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DataError::AnnouncementNotFound(id.to_string()))?;
        self.read_marks.retain(|m| m.announcement_id != id);
        Ok(self.announcements.remove(pos))
    }

    /// Announcements the session may see, newest first
    ///
    /// Regular users only see published ones; admins also see scheduled ones.
    pub fn visible_announcements(&self, session: &Session, now: DateTime<Utc>) -> Vec<&Announcement> {
        let mut visible: Vec<&Announcement> = self
            .announcements
            .iter()
            .filter(|a| session.is_admin() || a.is_published(now))
            .collect();
        visible.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        visible
    }

    pub fn is_read(&self, announcement_id: &str, user: &str) -> bool {
        self.read_marks
            .iter()
            .any(|m| m.announcement_id == announcement_id && m.user == user)
    }

    /// Record that the session's user read an announcement
    ///
    /// Returns false if it was already marked. Scheduled announcements cannot
    /// be marked by regular users since they cannot see them.
    pub fn mark_read(
        &mut self,
        session: &Session,
        announcement_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DataError> {
        let visible = self
            .announcements
            .iter()
            .any(|a| a.id == announcement_id && (session.is_admin() || a.is_published(now)));
        if !visible {
            return Err(DataError::AnnouncementNotFound(announcement_id.to_string()));
        }
        if self.is_read(announcement_id, &session.user) {
            return Ok(false);
        }
        self.read_marks.push(ReadMark {
            announcement_id: announcement_id.to_string(),
            user: session.user.clone(),
        });
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    pub fn submit_feedback(
        &mut self,
        author: &str,
        subject: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> Feedback {
        let id = self.next_feedback_id();
        let feedback = Feedback {
            id,
            author: author.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            status: FeedbackStatus::open,
            admin_note: None,
            created_at: now,
            updated_at: now,
        };
        self.feedback.push(feedback.clone());
        feedback
    }

    /// Change the status of a feedback item and optionally replace its note
    pub fn triage_feedback(
        &mut self,
        id: &str,
        status: FeedbackStatus,
        note: Option<Option<String>>,
        now: DateTime<Utc>,
    ) -> Result<Feedback, DataError> {
        let item = self
            .feedback
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| DataError::FeedbackNotFound(id.to_string()))?;
        item.status = status;
        if let Some(note) = note {
            item.admin_note = note;
        }
        item.updated_at = now;
        Ok(item.clone())
    }

    /// Feedback visible to the session: admins see all, users their own
    pub fn feedback_for(&self, session: &Session, status: Option<FeedbackStatus>) -> Vec<&Feedback> {
        self.feedback
            .iter()
            .filter(|f| session.is_admin() || f.author == session.user)
            .filter(|f| status.is_none_or(|s| f.status == s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn f(v: i64) -> Factor {
        Factor::new(v).unwrap()
    }

    fn simple(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_task_defaults_and_index() {
        let mut data = TasklistData::new();
        let task = data.create_task("alice", simple("Write report")).unwrap();

        assert_eq!(task.id, "task-1");
        assert_eq!(task.coefficient.get(), 9);
        assert_eq!(data.task_map.get("task-1"), Some(&"alice".to_string()));
        assert_eq!(data.task_count(), 1);
    }

    #[test]
    fn test_end_to_end_tree_rules() {
        let mut data = TasklistData::new();
        let a = data
            .create_task(
                "alice",
                NewTask {
                    title: "A".to_string(),
                    priority: Some(f(5)),
                    complexity: Some(f(2)),
                    length: Some(f(1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(a.coefficient.get(), 12);

        let b = data
            .create_task(
                "alice",
                NewTask {
                    title: "B".to_string(),
                    parent_id: Some(a.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();

        let err = data.set_completed("alice", &a.id, true).unwrap_err();
        assert!(matches!(
            err,
            DataError::Tree(TreeError::BlockedByIncompleteChildren { .. })
        ));
        assert!(!data.find_task("alice", &a.id).unwrap().completed);

        assert!(data.set_completed("alice", &b.id, true).unwrap());
        assert!(data.set_completed("alice", &a.id, true).unwrap());

        let err = data.delete_task("alice", &a.id).unwrap_err();
        assert!(matches!(
            err,
            DataError::Tree(TreeError::BlockedByExistingChildren { count: 1, .. })
        ));

        data.delete_task("alice", &b.id).unwrap();
        data.delete_task("alice", &a.id).unwrap();
        assert_eq!(data.task_count(), 0);
        assert!(data.task_map.is_empty());
    }

    #[test]
    fn test_grandchildren_not_inspected() {
        let mut data = TasklistData::new();
        let a = data.create_task("alice", simple("A")).unwrap();
        let b = data
            .create_task(
                "alice",
                NewTask {
                    title: "B".to_string(),
                    parent_id: Some(a.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();
        let c = data
            .create_task(
                "alice",
                NewTask {
                    title: "C".to_string(),
                    parent_id: Some(b.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(data.children_of(&a.id).len(), 1);
        assert!(data.set_completed("alice", &b.id, true).is_err());
        data.set_completed("alice", &c.id, true).unwrap();
        data.set_completed("alice", &b.id, true).unwrap();
        data.set_completed("alice", &a.id, true).unwrap();
    }

    #[test]
    fn test_reopen_child_leaves_parent_completed() {
        let mut data = TasklistData::new();
        let a = data.create_task("alice", simple("A")).unwrap();
        let b = data
            .create_task(
                "alice",
                NewTask {
                    title: "B".to_string(),
                    parent_id: Some(a.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();
        data.set_completed("alice", &b.id, true).unwrap();
        data.set_completed("alice", &a.id, true).unwrap();

        assert!(data.set_completed("alice", &b.id, false).unwrap());
        assert!(data.find_task("alice", &a.id).unwrap().completed);
        // repeating is a no-op
        assert!(!data.set_completed("alice", &b.id, false).unwrap());
    }

    #[test]
    fn test_open_task_refused_under_completed_parent() {
        let mut data = TasklistData::new();
        let a = data.create_task("alice", simple("A")).unwrap();
        data.set_completed("alice", &a.id, true).unwrap();

        let under_done = NewTask {
            title: "B".to_string(),
            parent_id: Some(a.id.clone()),
            ..Default::default()
        };
        assert_eq!(
            data.create_task("alice", under_done),
            Err(DataError::ParentCompleted(a.id.clone()))
        );
        assert_eq!(data.task_count(), 1);

        let open = data.create_task("alice", simple("Open")).unwrap();
        let move_under = TaskChanges {
            parent_id: Some(Some(a.id.clone())),
            ..Default::default()
        };
        assert_eq!(
            data.update_task("alice", &open.id, move_under.clone()),
            Err(DataError::ParentCompleted(a.id.clone()))
        );

        // a completed task may join a completed parent
        data.set_completed("alice", &open.id, true).unwrap();
        let moved = data.update_task("alice", &open.id, move_under).unwrap();
        assert_eq!(moved.parent_id.as_deref(), Some(a.id.as_str()));
    }

    #[test]
    fn test_update_recomputes_coefficient() {
        let mut data = TasklistData::new();
        let task = data.create_task("alice", simple("A")).unwrap();

        let updated = data
            .update_task(
                "alice",
                &task.id,
                TaskChanges {
                    priority: Some(f(5)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.coefficient.get(), 13);

        let updated = data
            .update_task(
                "alice",
                &task.id,
                TaskChanges {
                    complexity: Some(f(5)),
                    length: Some(f(5)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.coefficient.get(), 5);
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut data = TasklistData::new();
        let a = data.create_task("alice", simple("A")).unwrap();
        let b = data
            .create_task(
                "alice",
                NewTask {
                    title: "B".to_string(),
                    parent_id: Some(a.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();

        let to_self = TaskChanges {
            parent_id: Some(Some(a.id.clone())),
            ..Default::default()
        };
        assert!(matches!(
            data.update_task("alice", &a.id, to_self),
            Err(DataError::ParentCycle { .. })
        ));

        let under_child = TaskChanges {
            parent_id: Some(Some(b.id.clone())),
            ..Default::default()
        };
        assert!(matches!(
            data.update_task("alice", &a.id, under_child),
            Err(DataError::ParentCycle { .. })
        ));

        // detaching then deleting the former parent works
        let detach = TaskChanges {
            parent_id: Some(None),
            ..Default::default()
        };
        data.update_task("alice", &b.id, detach).unwrap();
        data.delete_task("alice", &a.id).unwrap();
    }

    #[test]
    fn test_tasks_are_scoped_to_owner() {
        let mut data = TasklistData::new();
        let a = data.create_task("alice", simple("A")).unwrap();

        assert!(data.find_task("bob", &a.id).is_none());
        assert_eq!(
            data.set_completed("bob", &a.id, true),
            Err(DataError::TaskNotFound(a.id.clone()))
        );
        let foreign_parent = NewTask {
            title: "B".to_string(),
            parent_id: Some(a.id.clone()),
            ..Default::default()
        };
        assert_eq!(
            data.create_task("bob", foreign_parent),
            Err(DataError::ParentNotFound(a.id.clone()))
        );
    }

    #[test]
    fn test_category_lifecycle() {
        let mut data = TasklistData::new();
        let cat = data.create_category("alice", "Work").unwrap();
        assert_eq!(
            data.create_category("alice", " work "),
            Err(DataError::DuplicateCategory("work".to_string()))
        );
        // other users have their own namespace
        data.create_category("bob", "Work").unwrap();

        let task = data
            .create_task(
                "alice",
                NewTask {
                    title: "A".to_string(),
                    category_id: Some(cat.id.clone()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(matches!(
            data.delete_category("alice", &cat.id),
            Err(DataError::CategoryInUse { count: 1, .. })
        ));

        let renamed = data.rename_category("alice", &cat.id, "Office").unwrap();
        assert_eq!(renamed.name, "Office");

        data.update_task(
            "alice",
            &task.id,
            TaskChanges {
                category_id: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        data.delete_category("alice", &cat.id).unwrap();
        assert!(data.categories_for("alice").is_empty());
        assert_eq!(data.categories_for("bob").len(), 1);
    }

    #[test]
    fn test_announcement_visibility_and_reads() {
        let mut data = TasklistData::new();
        let now = Utc::now();
        let live = data.publish_announcement("Live", "now", now - Duration::hours(1), now);
        let scheduled = data.publish_announcement("Soon", "later", now + Duration::days(1), now);

        let alice = Session::user("alice");
        let root = Session::admin("root");

        assert_eq!(data.visible_announcements(&alice, now).len(), 1);
        assert_eq!(data.visible_announcements(&root, now).len(), 2);

        assert!(data.mark_read(&alice, &live.id, now).unwrap());
        assert!(!data.mark_read(&alice, &live.id, now).unwrap());
        assert!(data.is_read(&live.id, "alice"));
        assert!(!data.is_read(&live.id, "bob"));
        assert_eq!(
            data.mark_read(&alice, &scheduled.id, now),
            Err(DataError::AnnouncementNotFound(scheduled.id.clone()))
        );

        data.delete_announcement(&live.id).unwrap();
        assert!(data.read_marks.is_empty());
    }

    #[test]
    fn test_feedback_triage() {
        let mut data = TasklistData::new();
        let now = Utc::now();
        let fb = data.submit_feedback("alice", "Bug", "List is slow", now);
        data.submit_feedback("bob", "Idea", "Dark mode", now);

        assert_eq!(data.feedback_for(&Session::user("alice"), None).len(), 1);
        assert_eq!(data.feedback_for(&Session::admin("root"), None).len(), 2);

        let triaged = data
            .triage_feedback(
                &fb.id,
                FeedbackStatus::resolved,
                Some(Some("Fixed in 0.3".to_string())),
                now,
            )
            .unwrap();
        assert_eq!(triaged.status, FeedbackStatus::resolved);
        assert_eq!(triaged.admin_note.as_deref(), Some("Fixed in 0.3"));
        assert_eq!(
            data.feedback_for(&Session::admin("root"), Some(FeedbackStatus::open))
                .len(),
            1
        );
    }
}
