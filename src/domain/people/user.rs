//! People referenced by evaluations. Read-only in this service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::rubric::Track;

/// Organizational role held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employer,
    Mentor,
    Leader,
    Manager,
    Rh,
    Committee,
    Admin,
    Developer,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[
            Role::Employer,
            Role::Mentor,
            Role::Leader,
            Role::Manager,
            Role::Rh,
            Role::Committee,
            Role::Admin,
            Role::Developer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employer => "employer",
            Role::Mentor => "mentor",
            Role::Leader => "leader",
            Role::Manager => "manager",
            Role::Rh => "rh",
            Role::Committee => "committee",
            Role::Admin => "admin",
            Role::Developer => "developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub position: Option<String>,
    pub track: Option<Track>,
    pub current_project: Option<String>,
    /// Active roles only.
    pub roles: Vec<Role>,
}

impl UserProfile {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
