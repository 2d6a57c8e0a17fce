//! # WasteOps Policy
//!
//! Role-based access decisions for the waste-management dashboard.
//!
//! ## Overview
//!
//! Every button, page and route asks the same question: may the current
//! session role do this? The answers live in one place, [`predicates`], and
//! every other API in this crate is a view over those functions:
//!
//! - [`Capability`]: named permission questions and table-driven dispatch
//! - [`CapabilitySet`]: all answers for a role, serializable for the UI
//! - [`AccessGate`]: checks against a live [`RoleSource`], re-read per check
//! - [`Surface`]: UI elements and route guards mapped to capabilities
//!
//! Predicates are total. An unknown or missing role is a normal input and is
//! denied everything; nothing in this crate returns an error or panics.
//!
//! ## Example
//!
//! ```rust
//! use wasteops_policy::{AccessGate, Capability, SessionRole, Surface, SurfaceState};
//!
//! let session = SessionRole::new("EDITOR_INSTITUTION");
//! let gate = AccessGate::new(session.clone());
//!
//! assert!(gate.allows(Capability::CanViewOperators));
//! assert!(!gate.allows(Capability::CanEditData));
//! assert_eq!(
//!     Surface::EditButton.state_for(gate.role()),
//!     SurfaceState::Disabled
//! );
//!
//! session.set(Some("REGULATOR_VIEWER".into()));
//! assert!(!gate.allows(Capability::CanViewOperators));
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod capability;
pub mod gate;
pub mod predicates;
pub mod surface;

pub use capability::{Capability, CapabilitySet};
pub use gate::{AccessDecision, AccessGate, RoleSource, SessionRole};
pub use predicates::{
    can_access_institutions_page, can_access_sectors_page, can_access_users_page,
    can_create_data, can_delete_data, can_edit_data, can_manage_users, can_view_operators,
    classify, RoleClass,
};
pub use surface::{Surface, SurfaceState};
pub use wasteops_types::Role;
