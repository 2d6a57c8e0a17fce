//! Capability table
//!
//! [`Capability`] names each permission question and dispatches to the
//! predicate that answers it, so call sites can iterate, serialize or log
//! capabilities without restating any rule.

use crate::predicates;
use serde::{Deserialize, Serialize};
use std::fmt;
use wasteops_types::Role;

/// A yes/no permission question asked of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    CanEditData,
    CanCreateData,
    CanDeleteData,
    CanManageUsers,
    CanViewOperators,
    CanAccessSectorsPage,
    CanAccessInstitutionsPage,
    CanAccessUsersPage,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::CanEditData,
        Capability::CanCreateData,
        Capability::CanDeleteData,
        Capability::CanManageUsers,
        Capability::CanViewOperators,
        Capability::CanAccessSectorsPage,
        Capability::CanAccessInstitutionsPage,
        Capability::CanAccessUsersPage,
    ];

    /// Name used by UI call sites
    pub fn name(&self) -> &'static str {
        match self {
            Capability::CanEditData => "canEditData",
            Capability::CanCreateData => "canCreateData",
            Capability::CanDeleteData => "canDeleteData",
            Capability::CanManageUsers => "canManageUsers",
            Capability::CanViewOperators => "canViewOperators",
            Capability::CanAccessSectorsPage => "canAccessSectorsPage",
            Capability::CanAccessInstitutionsPage => "canAccessInstitutionsPage",
            Capability::CanAccessUsersPage => "canAccessUsersPage",
        }
    }

    pub fn from_name(name: &str) -> Option<Capability> {
        Capability::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Answer this question for a role
    pub fn evaluate(&self, role: Option<Role>) -> bool {
        match self {
            Capability::CanEditData => predicates::can_edit_data(role),
            Capability::CanCreateData => predicates::can_create_data(role),
            Capability::CanDeleteData => predicates::can_delete_data(role),
            Capability::CanManageUsers => predicates::can_manage_users(role),
            Capability::CanViewOperators => predicates::can_view_operators(role),
            Capability::CanAccessSectorsPage => predicates::can_access_sectors_page(role),
            Capability::CanAccessInstitutionsPage => {
                predicates::can_access_institutions_page(role)
            }
            Capability::CanAccessUsersPage => predicates::can_access_users_page(role),
        }
    }

    /// Answer this question for a raw session value
    pub fn evaluate_raw(&self, raw_role: &str) -> bool {
        self.evaluate(Role::parse(raw_role))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every capability answered for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    pub can_edit_data: bool,
    pub can_create_data: bool,
    pub can_delete_data: bool,
    pub can_manage_users: bool,
    pub can_view_operators: bool,
    pub can_access_sectors_page: bool,
    pub can_access_institutions_page: bool,
    pub can_access_users_page: bool,
}

impl CapabilitySet {
    pub fn for_role(role: Option<Role>) -> Self {
        Self {
            can_edit_data: Capability::CanEditData.evaluate(role),
            can_create_data: Capability::CanCreateData.evaluate(role),
            can_delete_data: Capability::CanDeleteData.evaluate(role),
            can_manage_users: Capability::CanManageUsers.evaluate(role),
            can_view_operators: Capability::CanViewOperators.evaluate(role),
            can_access_sectors_page: Capability::CanAccessSectorsPage.evaluate(role),
            can_access_institutions_page: Capability::CanAccessInstitutionsPage.evaluate(role),
            can_access_users_page: Capability::CanAccessUsersPage.evaluate(role),
        }
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::CanEditData => self.can_edit_data,
            Capability::CanCreateData => self.can_create_data,
            Capability::CanDeleteData => self.can_delete_data,
            Capability::CanManageUsers => self.can_manage_users,
            Capability::CanViewOperators => self.can_view_operators,
            Capability::CanAccessSectorsPage => self.can_access_sectors_page,
            Capability::CanAccessInstitutionsPage => self.can_access_institutions_page,
            Capability::CanAccessUsersPage => self.can_access_users_page,
        }
    }

    /// Granted capabilities, in table order
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.get(*c))
            .collect()
    }
}
