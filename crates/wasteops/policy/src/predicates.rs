//! Capability predicates
//!
//! Every authorization answer in the dashboard comes from this module. Each
//! predicate is a total function of the session role: `None` stands for an
//! absent or unrecognized role and is denied everything.
//!
//! Changing who may mutate data means editing [`can_mutate_data`] and
//! nothing else.

use serde::{Deserialize, Serialize};
use wasteops_types::Role;

/// Role membership flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleClass {
    pub is_platform_admin: bool,
    pub is_institution_admin: bool,
    pub is_editor: bool,
    pub is_regulator: bool,
}

/// Classify a role; at most one flag is set, none for an unknown role
pub fn classify(role: Option<Role>) -> RoleClass {
    RoleClass {
        is_platform_admin: role == Some(Role::PlatformAdmin),
        is_institution_admin: role == Some(Role::AdminInstitution),
        is_editor: role == Some(Role::EditorInstitution),
        is_regulator: role == Some(Role::RegulatorViewer),
    }
}

// Shared rule for edit/create/delete.
fn can_mutate_data(role: Option<Role>) -> bool {
    matches!(role, Some(Role::PlatformAdmin))
}

// Everyone except the read-only regulator. Unknown roles stay denied.
fn is_operational_staff(role: Option<Role>) -> bool {
    matches!(role, Some(r) if r != Role::RegulatorViewer)
}

pub fn can_edit_data(role: Option<Role>) -> bool {
    can_mutate_data(role)
}

pub fn can_create_data(role: Option<Role>) -> bool {
    can_mutate_data(role)
}

pub fn can_delete_data(role: Option<Role>) -> bool {
    can_mutate_data(role)
}

pub fn can_manage_users(role: Option<Role>) -> bool {
    matches!(role, Some(Role::PlatformAdmin | Role::AdminInstitution))
}

pub fn can_view_operators(role: Option<Role>) -> bool {
    is_operational_staff(role)
}

pub fn can_access_sectors_page(role: Option<Role>) -> bool {
    is_operational_staff(role)
}

pub fn can_access_institutions_page(role: Option<Role>) -> bool {
    is_operational_staff(role)
}

/// Users page follows user management
pub fn can_access_users_page(role: Option<Role>) -> bool {
    can_manage_users(role)
}
