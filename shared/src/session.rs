//! Session / role store.
//!
//! Holds the role of the authenticated user. `None` means logged out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization tier reported by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Teacher,
    ClassTeacher,
    Student,
    /// Any role string the console does not know. Such a session is
    /// authenticated but matches no role requirement and gets an empty menu.
    Unrecognized(String),
}

impl Role {
    /// Parses the role string sent by the backend. Never fails.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "Admin" => Role::Admin,
            "Teacher" => Role::Teacher,
            "ClassTeacher" => Role::ClassTeacher,
            "Student" => Role::Student,
            other => Role::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::ClassTeacher => "ClassTeacher",
            Role::Student => "Student",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from_wire(&raw))
    }
}

/// Process-wide session state.
///
/// Exactly one role is active at a time; replacing it is a single assignment,
/// so readers observe either the old or the new role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    role: Option<Role>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(role: Role) -> Self {
        Self { role: Some(role) }
    }

    /// Replaces the current role. No validation is performed.
    pub fn set_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    /// Current role, or `None` when logged out.
    pub fn get_role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn clear_role(&mut self) {
        self.role = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            role: self.role.clone(),
        }
    }

    pub fn restore(snapshot: SessionSnapshot) -> Self {
        Self {
            role: snapshot.role,
        }
    }
}

/// Serializable form of a [`Session`], used when the role is persisted in the
/// browser between reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub role: Option<Role>,
}
