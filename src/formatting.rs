//! Formatting helper functions for the task list MCP server
//!
//! Filters narrow a task list before it is rendered; the `format_*`
//! functions produce the text returned to the client.

use crate::tasklist::{Announcement, Category, Feedback, Task};
use chrono::{DateTime, Utc};

/// Keep only tasks in the given category
pub fn apply_category_filter(tasks: &mut Vec<Task>, category_id: &str) {
    tasks.retain(|t| t.category_id.as_deref() == Some(category_id));
}

/// Keep only tasks with the given completion state
pub fn apply_completed_filter(tasks: &mut Vec<Task>, completed: bool) {
    tasks.retain(|t| t.completed == completed);
}

/// Keep only direct children of `parent_id`; `""` keeps top-level tasks
pub fn apply_parent_filter(tasks: &mut Vec<Task>, parent_id: &str) {
    if parent_id.is_empty() {
        tasks.retain(|t| t.parent_id.is_none());
    } else {
        tasks.retain(|t| t.is_child_of(parent_id));
    }
}

/// Apply keyword filtering (case-insensitive search in id, title, and description)
pub fn apply_keyword_filter(tasks: &mut Vec<Task>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    tasks.retain(|task| {
        let id_matches = task.id.to_lowercase().contains(&keyword_lower);
        let title_matches = task.title.to_lowercase().contains(&keyword_lower);
        let description_matches = task
            .description
            .as_ref()
            .map(|d| d.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false);

        id_matches || title_matches || description_matches
    });
}

/// Highest coefficient first; ties keep creation order
pub fn sort_by_coefficient(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.coefficient.cmp(&a.coefficient));
}

/// Format tasks into a display string
///
/// # Arguments
/// * `tasks` - Tasks to render, already filtered and sorted
/// * `categories` - Categories of the same owner, used to show names
/// * `exclude_description` - Whether to leave descriptions out
pub fn format_tasks(tasks: &[Task], categories: &[&Category], exclude_description: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format!(
            "- [{}] {} {} (coefficient: {}, priority: {}, complexity: {}, length: {})\n",
            if task.completed { "x" } else { " " },
            task.id,
            task.title,
            task.coefficient,
            task.priority,
            task.complexity,
            task.length
        ));

        if let Some(ref parent) = task.parent_id {
            result.push_str(&format!("  Parent: {}\n", parent));
        }
        if let Some(ref category_id) = task.category_id {
            match categories.iter().find(|c| &c.id == category_id) {
                Some(c) => result.push_str(&format!("  Category: {} ({})\n", c.name, c.id)),
                None => result.push_str(&format!("  Category: {}\n", category_id)),
            }
        }
        if !exclude_description && let Some(ref d) = task.description {
            result.push_str(&format!("  Description: {}\n", d));
        }
        result.push_str(&format!("  Created: {}\n", task.created_at));
        result.push_str(&format!("  Updated: {}\n", task.updated_at));
    }

    result
}

/// Format categories with the number of tasks in each
pub fn format_categories(categories: &[(&Category, usize)]) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let mut result = format!("Found {} category(ies):\n\n", categories.len());
    for (category, count) in categories {
        result.push_str(&format!(
            "- [{}] {} ({} task(s))\n",
            category.id, category.name, count
        ));
    }
    result
}

/// Format announcements with their read state for the viewer
pub fn format_announcements(entries: &[(&Announcement, bool)], now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return "No announcements".to_string();
    }

    let unread = entries.iter().filter(|(_, read)| !read).count();
    let mut result = format!(
        "Found {} announcement(s), {} unread:\n\n",
        entries.len(),
        unread
    );
    for (announcement, read) in entries {
        let state = if !announcement.is_published(now) {
            "scheduled"
        } else if *read {
            "read"
        } else {
            "unread"
        };
        result.push_str(&format!(
            "- [{}] {} ({})\n",
            announcement.id, announcement.title, state
        ));
        result.push_str(&format!(
            "  Published: {}\n",
            announcement.published_at.to_rfc3339()
        ));
        result.push_str(&format!("  {}\n", announcement.body));
    }
    result
}

/// Format feedback items
pub fn format_feedback(items: &[&Feedback]) -> String {
    if items.is_empty() {
        return "No feedback found".to_string();
    }

    let mut result = format!("Found {} feedback item(s):\n\n", items.len());
    for item in items {
        result.push_str(&format!(
            "- [{}] {} (status: {:?}, from: {})\n",
            item.id, item.subject, item.status, item.author
        ));
        result.push_str(&format!("  Message: {}\n", item.message));
        if let Some(ref note) = item.admin_note {
            result.push_str(&format!("  Admin note: {}\n", note));
        }
        result.push_str(&format!("  Submitted: {}\n", item.created_at.to_rfc3339()));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasklist::Factor;

    fn task(id: &str, title: &str, p: i64, c: i64, l: i64) -> Task {
        Task::new(
            id,
            "alice",
            title,
            Factor::new(p).unwrap(),
            Factor::new(c).unwrap(),
            Factor::new(l).unwrap(),
        )
    }

    #[test]
    fn test_sort_by_coefficient_is_stable() {
        let mut tasks = vec![
            task("task-1", "low", 1, 5, 5),
            task("task-2", "mid-a", 3, 3, 3),
            task("task-3", "top", 5, 1, 1),
            task("task-4", "mid-b", 3, 3, 3),
        ];
        sort_by_coefficient(&mut tasks);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-3", "task-2", "task-4", "task-1"]);
    }

    #[test]
    fn test_parent_filter() {
        let mut child = task("task-2", "child", 1, 1, 1);
        child.parent_id = Some("task-1".to_string());
        let tasks = vec![task("task-1", "root", 1, 1, 1), child];

        let mut roots = tasks.clone();
        apply_parent_filter(&mut roots, "");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, "task-1");

        let mut children = tasks;
        apply_parent_filter(&mut children, "task-1");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "task-2");
    }

    #[test]
    fn test_keyword_filter() {
        let mut described = task("task-2", "Groceries", 1, 1, 1);
        described.description = Some("Buy MILK".to_string());
        let mut tasks = vec![task("task-1", "Report", 1, 1, 1), described];

        apply_keyword_filter(&mut tasks, "milk");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "task-2");
    }

    #[test]
    fn test_format_tasks() {
        let mut done = task("task-1", "Ship it", 5, 2, 1);
        done.completed = true;
        let out = format_tasks(&[done], &[], false);
        assert!(out.contains("Found 1 task(s)"));
        assert!(out.contains("- [x] task-1 Ship it (coefficient: 12"));

        assert_eq!(format_tasks(&[], &[], false), "No tasks found");
    }
}
