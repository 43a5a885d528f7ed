use super::coefficient::{Coefficient, Factor, compute_coefficient};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// A task in a user's list
///
/// `coefficient` is derived from the three factors and is only ever written
/// through [`Task::set_factors`] or [`Task::recompute_coefficient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    /// Unique identifier (e.g., "task-12")
    pub id: String,
    /// User who owns this task
    pub owner: String,
    /// Short title
    pub title: String,
    /// Optional longer description in Markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Urgency, 5 = most urgent
    #[serde(default)]
    pub priority: Factor,
    /// Difficulty, 5 = hardest
    #[serde(default)]
    pub complexity: Factor,
    /// Estimated duration, 5 = longest
    #[serde(default)]
    pub length: Factor,
    /// Recomputed from the factors on load
    #[serde(default = "default_coefficient")]
    pub coefficient: Coefficient,
    #[serde(default)]
    pub completed: bool,
    /// Optional parent task ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Optional category ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default = "local_date_today")]
    pub created_at: NaiveDate,
    #[serde(default = "local_date_today")]
    pub updated_at: NaiveDate,
}

fn default_coefficient() -> Coefficient {
    let f = Factor::default();
    compute_coefficient(f, f, f)
}

impl Default for Task {
    fn default() -> Self {
        let f = Factor::default();
        Self {
            id: String::new(),
            owner: String::new(),
            title: String::new(),
            description: None,
            priority: f,
            complexity: f,
            length: f,
            coefficient: default_coefficient(),
            completed: false,
            parent_id: None,
            category_id: None,
            created_at: local_date_today(),
            updated_at: local_date_today(),
        }
    }
}

impl Task {
    /// Create a new incomplete task with its coefficient computed
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        title: impl Into<String>,
        priority: Factor,
        complexity: Factor,
        length: Factor,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            title: title.into(),
            priority,
            complexity,
            length,
            coefficient: compute_coefficient(priority, complexity, length),
            ..Default::default()
        }
    }

    /// Replace any of the three factors and recompute the coefficient
    ///
    /// Returns true if the coefficient changed.
    pub fn set_factors(
        &mut self,
        priority: Option<Factor>,
        complexity: Option<Factor>,
        length: Option<Factor>,
    ) -> bool {
        if let Some(p) = priority {
            self.priority = p;
        }
        if let Some(c) = complexity {
            self.complexity = c;
        }
        if let Some(l) = length {
            self.length = l;
        }
        self.recompute_coefficient()
    }

    /// Bring the stored coefficient back in line with the factors
    ///
    /// Returns true if the stored value had drifted.
    pub fn recompute_coefficient(&mut self) -> bool {
        let fresh = compute_coefficient(self.priority, self.complexity, self.length);
        let drifted = fresh != self.coefficient;
        self.coefficient = fresh;
        drifted
    }

    pub fn is_child_of(&self, parent_id: &str) -> bool {
        self.parent_id.as_deref() == Some(parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: i64) -> Factor {
        Factor::new(v).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("task-1", "alice", "Write report", f(1), f(1), f(1));
        assert!(!task.completed);
        assert!(task.parent_id.is_none());
        assert_eq!(task.coefficient.get(), 9);
    }

    #[test]
    fn test_default_factors_are_one() {
        let task = Task::default();
        assert_eq!(task.priority.get(), 1);
        assert_eq!(task.complexity.get(), 1);
        assert_eq!(task.length.get(), 1);
        assert_eq!(task.coefficient.get(), 9);
    }

    #[test]
    fn test_set_factors_recomputes() {
        let mut task = Task::new("task-1", "alice", "Write report", f(3), f(3), f(3));
        assert_eq!(task.coefficient.get(), 5);

        assert!(task.set_factors(Some(f(5)), None, None));
        assert_eq!(task.coefficient.get(), 7);

        assert!(task.set_factors(None, Some(f(1)), Some(f(1))));
        assert_eq!(task.coefficient.get(), 13);

        // unchanged inputs leave the coefficient alone
        assert!(!task.set_factors(Some(f(5)), None, None));
    }

    #[test]
    fn test_recompute_detects_drift() {
        let mut task = Task::new("task-1", "alice", "x", f(2), f(2), f(2));
        task.coefficient = Coefficient::MAX;
        assert!(task.recompute_coefficient());
        assert_eq!(task.coefficient.get(), 8);
        assert!(!task.recompute_coefficient());
    }

    #[test]
    fn test_toml_rejects_unknown_fields() {
        let toml_str = r#"
id = "task-1"
owner = "alice"
title = "x"
mystery = 1
"#;
        assert!(toml::from_str::<Task>(toml_str).is_err());
    }

    #[test]
    fn test_toml_rejects_out_of_range_factor() {
        let toml_str = r#"
id = "task-1"
owner = "alice"
title = "x"
priority = 7
"#;
        assert!(toml::from_str::<Task>(toml_str).is_err());
    }
}
