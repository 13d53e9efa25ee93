//! Household member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ids::MemberId;

/// What a member may do in the household book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    #[default]
    Editor,
    Viewer,
}

impl MemberRole {
    /// Parse a role from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// A person transactions can be attributed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Create a member with a fresh id
    pub fn new(name: impl Into<String>, role: MemberRole) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: None,
            role,
            joined_at: Utc::now(),
        }
    }

    /// The owner every book starts with
    ///
    /// Always the nil id and the Unix epoch, so every seeding produces the
    /// same record.
    pub fn owner() -> Self {
        Self {
            id: MemberId::from_uuid(Uuid::nil()),
            name: "Me".into(),
            email: None,
            role: MemberRole::Admin,
            joined_at: DateTime::<Utc>::default(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
