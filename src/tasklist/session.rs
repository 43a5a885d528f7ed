//! Request-scoped identity
//!
//! Every handler receives the caller's [`Session`] explicitly. Nothing about
//! the current user lives in global state.

use std::fmt;
use std::str::FromStr;

/// Access tier of a user
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Manages their own tasks, categories and feedback
    user,
    /// Additionally publishes announcements and triages feedback
    admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::user),
            "admin" => Ok(Role::admin),
            _ => Err(format!(
                "Invalid role '{}'. Valid options are: user, admin",
                s
            )),
        }
    }
}

/// The authenticated caller of a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
    pub role: Role,
}

impl Session {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            user: name.into(),
            role: Role::user,
        }
    }

    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            user: name.into(),
            role: Role::admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::admin
    }

    /// Two-tier role check for admin-only operations
    pub fn require_admin(&self, action: &str) -> Result<(), String> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(format!(
                "Permission denied: only administrators can {}. User '{}' has role 'user'.",
                action, self.user
            ))
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.user, self.role)
    }
}
