//! Session roles
//!
//! A session carries exactly one role. Roles are a closed set and carry no
//! implied hierarchy: what each role may do is decided capability by
//! capability in `wasteops-policy`, never by comparing roles.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorization class of an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Operates the whole platform
    PlatformAdmin,

    /// Administers one institution and its users
    AdminInstitution,

    /// Edits data on behalf of one institution
    EditorInstitution,

    /// Read-only regulator access
    RegulatorViewer,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [
        Role::PlatformAdmin,
        Role::AdminInstitution,
        Role::EditorInstitution,
        Role::RegulatorViewer,
    ];

    /// Wire constant for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PlatformAdmin => "PLATFORM_ADMIN",
            Role::AdminInstitution => "ADMIN_INSTITUTION",
            Role::EditorInstitution => "EDITOR_INSTITUTION",
            Role::RegulatorViewer => "REGULATOR_VIEWER",
        }
    }

    /// Interpret a raw session value.
    ///
    /// Accepts any string. Values that are not exactly a wire constant yield
    /// `None`, which every capability treats as "no access". Padding and case
    /// are significant.
    pub fn parse(raw: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == raw)
    }

    /// Interpret an optional raw session value; absent means no role
    pub fn from_session(raw: Option<&str>) -> Option<Role> {
        raw.and_then(Role::parse)
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| TypesError::UnknownRole {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
