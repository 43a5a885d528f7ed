//! Task coefficient and task-tree gating rules
//!
//! The coefficient ranks a task by combining its three factors:
//!
//! ```text
//! coefficient = priority + (5 - complexity) + (5 - length)
//! ```
//!
//! Urgent, easy, short tasks float to the top (13); low-priority, hard, long
//! tasks sink to the bottom (1). The two gates decide whether a task may be
//! completed or deleted given its *direct* children only.

use super::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowest accepted factor value
pub const FACTOR_MIN: u8 = 1;
/// Highest accepted factor value
pub const FACTOR_MAX: u8 = 5;

/// Errors raised by the coefficient engine and the tree gates
///
/// All variants are recoverable by the caller: fix the input range, complete
/// the children first, or remove the children first, then retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Invalid {field} '{value}': must be an integer between 1 and 5")]
    InvalidInputRange { field: &'static str, value: i64 },

    #[error(
        "Task '{task_id}' cannot be completed while it has incomplete subtasks: {}. Complete them first.",
        .incomplete.join(", ")
    )]
    BlockedByIncompleteChildren {
        task_id: String,
        incomplete: Vec<String>,
    },

    #[error(
        "Task '{task_id}' cannot be deleted while it has {count} subtask(s). Delete or move them first."
    )]
    BlockedByExistingChildren { task_id: String, count: usize },
}

/// One of the three bounded task inputs (priority, complexity, length)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Factor(u8);

impl Factor {
    /// Validate a raw value for the named field
    pub fn for_field(field: &'static str, value: i64) -> Result<Self, TreeError> {
        if (FACTOR_MIN as i64..=FACTOR_MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TreeError::InvalidInputRange { field, value })
        }
    }

    /// Validate a raw value without naming the field
    pub fn new(value: i64) -> Result<Self, TreeError> {
        Self::for_field("factor", value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Factor {
    fn default() -> Self {
        Self(FACTOR_MIN)
    }
}

impl TryFrom<i64> for Factor {
    type Error = TreeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Factor> for i64 {
    fn from(factor: Factor) -> Self {
        factor.0 as i64
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived ranking score in [1, 13]; higher means address sooner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficient(u8);

impl Coefficient {
    pub const MIN: Coefficient = Coefficient(1);
    pub const MAX: Coefficient = Coefficient(13);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the coefficient for the given factors
///
/// Pure and total: the `Factor` type already guarantees the [1, 5] range, so
/// the result always lies in [1, 13].
pub fn compute_coefficient(priority: Factor, complexity: Factor, length: Factor) -> Coefficient {
    Coefficient(priority.0 + (FACTOR_MAX - complexity.0) + (FACTOR_MAX - length.0))
}

/// Decide whether `task_id` may be marked complete given its direct children
///
/// Every direct child must already be complete. Grandchildren are not
/// inspected: each level satisfied this same rule when it was completed.
pub fn can_complete(task_id: &str, children: &[&Task]) -> Result<(), TreeError> {
    let incomplete: Vec<String> = children
        .iter()
        .filter(|c| !c.completed)
        .map(|c| c.id.clone())
        .collect();

    if incomplete.is_empty() {
        Ok(())
    } else {
        Err(TreeError::BlockedByIncompleteChildren {
            task_id: task_id.to_string(),
            incomplete,
        })
    }
}

/// Decide whether `task_id` may be deleted given its direct children
pub fn can_delete(task_id: &str, children: &[&Task]) -> Result<(), TreeError> {
    if children.is_empty() {
        Ok(())
    } else {
        Err(TreeError::BlockedByExistingChildren {
            task_id: task_id.to_string(),
            count: children.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: i64) -> Factor {
        Factor::new(v).unwrap()
    }

    fn child(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            completed,
            ..Default::default()
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(compute_coefficient(f(5), f(1), f(1)).get(), 13);
        assert_eq!(compute_coefficient(f(1), f(5), f(5)).get(), 1);
        assert_eq!(compute_coefficient(f(3), f(3), f(3)).get(), 5);
        assert_eq!(compute_coefficient(f(5), f(2), f(1)).get(), 12);
    }

    #[test]
    fn test_range_over_all_inputs() {
        for p in 1..=5 {
            for c in 1..=5 {
                for l in 1..=5 {
                    let k = compute_coefficient(f(p), f(c), f(l));
                    assert!(k >= Coefficient::MIN && k <= Coefficient::MAX);
                }
            }
        }
    }

    #[test]
    fn test_extremes_only_at_corners() {
        for p in 1..=5 {
            for c in 1..=5 {
                for l in 1..=5 {
                    let k = compute_coefficient(f(p), f(c), f(l)).get();
                    if k == 13 {
                        assert_eq!((p, c, l), (5, 1, 1));
                    }
                    if k == 1 {
                        assert_eq!((p, c, l), (1, 5, 5));
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotonicity() {
        for a in 1..=5 {
            for b in 1..=5 {
                for x in 1..5 {
                    // strictly increasing in priority
                    assert!(
                        compute_coefficient(f(x + 1), f(a), f(b))
                            > compute_coefficient(f(x), f(a), f(b))
                    );
                    // strictly decreasing in complexity and length
                    assert!(
                        compute_coefficient(f(a), f(x + 1), f(b))
                            < compute_coefficient(f(a), f(x), f(b))
                    );
                    assert!(
                        compute_coefficient(f(a), f(b), f(x + 1))
                            < compute_coefficient(f(a), f(b), f(x))
                    );
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let first = compute_coefficient(f(4), f(2), f(3));
        let second = compute_coefficient(f(4), f(2), f(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_factor_rejects_out_of_range() {
        assert!(Factor::new(0).is_err());
        assert!(Factor::new(6).is_err());
        assert!(Factor::new(-3).is_err());
        assert_eq!(
            Factor::for_field("priority", 9),
            Err(TreeError::InvalidInputRange {
                field: "priority",
                value: 9
            })
        );
        assert_eq!(Factor::default().get(), 1);
    }

    #[test]
    fn test_can_complete() {
        let open = child("b", false);
        let done1 = child("c", true);
        let done2 = child("d", true);

        assert!(can_complete("a", &[]).is_ok());
        assert!(can_complete("a", &[&done1, &done2]).is_ok());

        let err = can_complete("a", &[&done1, &open]).unwrap_err();
        assert_eq!(
            err,
            TreeError::BlockedByIncompleteChildren {
                task_id: "a".to_string(),
                incomplete: vec!["b".to_string()],
            }
        );
        assert!(err.to_string().contains("Complete them first"));
        // same inputs, same answer
        assert_eq!(can_complete("a", &[&done1, &open]).unwrap_err(), err);
    }

    #[test]
    fn test_can_delete() {
        let b = child("b", true);
        assert!(can_delete("a", &[]).is_ok());

        let err = can_delete("a", &[&b]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::BlockedByExistingChildren { count: 1, .. }
        ));
        assert!(err.to_string().contains("1 subtask(s)"));
    }
}
