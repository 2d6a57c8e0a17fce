//! UI surfaces and route guards
//!
//! Each surface maps to exactly one capability. Denied navigation surfaces
//! are hidden; denied action controls stay visible but disabled.

use crate::capability::Capability;
use serde::{Deserialize, Serialize};
use wasteops_types::Role;

/// Dashboard element guarded by a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    SectorsPage,
    InstitutionsPage,
    UsersPage,
    OperatorsPanel,
    CreateButton,
    EditButton,
    DeleteButton,
    ManageUsersAction,
}

/// Rendering state of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceState {
    Enabled,
    Disabled,
    Hidden,
}

impl Surface {
    pub const ALL: [Surface; 8] = [
        Surface::SectorsPage,
        Surface::InstitutionsPage,
        Surface::UsersPage,
        Surface::OperatorsPanel,
        Surface::CreateButton,
        Surface::EditButton,
        Surface::DeleteButton,
        Surface::ManageUsersAction,
    ];

    pub fn required_capability(&self) -> Capability {
        match self {
            Surface::SectorsPage => Capability::CanAccessSectorsPage,
            Surface::InstitutionsPage => Capability::CanAccessInstitutionsPage,
            Surface::UsersPage => Capability::CanAccessUsersPage,
            Surface::OperatorsPanel => Capability::CanViewOperators,
            Surface::CreateButton => Capability::CanCreateData,
            Surface::EditButton => Capability::CanEditData,
            Surface::DeleteButton => Capability::CanDeleteData,
            Surface::ManageUsersAction => Capability::CanManageUsers,
        }
    }

    /// Pages and panels are navigation; the rest are actions
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Surface::SectorsPage
                | Surface::InstitutionsPage
                | Surface::UsersPage
                | Surface::OperatorsPanel
        )
    }

    pub fn state_for(&self, role: Option<Role>) -> SurfaceState {
        if self.required_capability().evaluate(role) {
            SurfaceState::Enabled
        } else if self.is_navigation() {
            SurfaceState::Hidden
        } else {
            SurfaceState::Disabled
        }
    }

    /// Route guard: may the role open this surface at all
    pub fn permits(&self, role: Option<Role>) -> bool {
        self.state_for(role) == SurfaceState::Enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regulator_surfaces() {
        let role = Some(Role::RegulatorViewer);
        assert_eq!(Surface::SectorsPage.state_for(role), SurfaceState::Hidden);
        assert_eq!(Surface::OperatorsPanel.state_for(role), SurfaceState::Hidden);
        assert_eq!(Surface::EditButton.state_for(role), SurfaceState::Disabled);
    }

    #[test]
    fn test_editor_sees_pages_but_cannot_mutate() {
        let role = Some(Role::EditorInstitution);
        assert!(Surface::InstitutionsPage.permits(role));
        assert!(!Surface::UsersPage.permits(role));
        assert_eq!(Surface::DeleteButton.state_for(role), SurfaceState::Disabled);
    }

    #[test]
    fn test_unknown_role_gets_nothing_enabled() {
        for surface in Surface::ALL {
            assert_ne!(surface.state_for(None), SurfaceState::Enabled);
        }
    }
}
