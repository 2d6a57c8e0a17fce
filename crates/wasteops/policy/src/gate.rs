//! Access gate
//!
//! The gate answers capability questions for whoever holds the session right
//! now. It never stores a role: every check reads the role from its
//! [`RoleSource`], so a downgrade takes effect on the next check.

use crate::capability::{Capability, CapabilitySet};
use crate::predicates::{self, RoleClass};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use wasteops_types::Role;

/// Supplies the raw role of the current session
pub trait RoleSource: Send + Sync {
    /// Raw role value, or `None` while the session is not loaded
    fn current_role(&self) -> Option<String>;
}

impl<F> RoleSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_role(&self) -> Option<String> {
        self()
    }
}

/// Role source backed by a session slot that can be swapped at runtime
#[derive(Debug, Clone, Default)]
pub struct SessionRole {
    slot: Arc<RwLock<Option<String>>>,
}

impl SessionRole {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    /// Replace the session role
    pub fn set(&self, raw: Option<String>) {
        // A poisoned slot still holds the last written value.
        let mut slot = match self.slot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = raw;
    }
}

impl RoleSource for SessionRole {
    fn current_role(&self) -> Option<String> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Record of a single access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Capability that was asked
    pub capability: Capability,

    /// Raw session value at the time of the check
    pub raw_role: Option<String>,

    /// Recognized role, if any
    pub role: Option<Role>,

    /// Whether the capability was granted
    pub allowed: bool,
}

/// Capability checks against a live role source
#[derive(Debug, Clone)]
pub struct AccessGate<S> {
    source: S,
}

impl<S: RoleSource> AccessGate<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Role as recognized right now
    pub fn role(&self) -> Option<Role> {
        Role::from_session(self.source.current_role().as_deref())
    }

    pub fn classify(&self) -> RoleClass {
        predicates::classify(self.role())
    }

    /// Check one capability
    pub fn allows(&self, capability: Capability) -> bool {
        self.decide(capability).allowed
    }

    /// Check one capability and keep the details
    pub fn decide(&self, capability: Capability) -> AccessDecision {
        let raw_role = self.source.current_role();
        let role = Role::from_session(raw_role.as_deref());
        let allowed = capability.evaluate(role);

        if role.is_none() && raw_role.is_some() {
            tracing::debug!(capability = %capability, raw_role = ?raw_role, "unrecognized role denied");
        }
        tracing::trace!(capability = %capability, role = ?role, allowed, "access check");

        AccessDecision {
            capability,
            raw_role,
            role,
            allowed,
        }
    }

    /// Every capability for the current role
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::for_role(self.role())
    }
}
