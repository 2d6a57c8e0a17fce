//! Capability and surface inspection for a session role

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use tabled::Tabled;
use wasteops_policy::{
    AccessDecision, AccessGate, Capability, RoleClass, SessionRole, Surface, SurfaceState,
};

#[derive(Serialize)]
struct AccessReport {
    raw_role: Option<String>,
    role: Option<String>,
    class: RoleClass,
    decisions: Vec<AccessDecision>,
}

#[derive(Tabled)]
struct CapabilityRow {
    #[tabled(rename = "Capability")]
    capability: String,
    #[tabled(rename = "Allowed")]
    allowed: String,
}

#[derive(Serialize, Tabled)]
struct SurfaceRow {
    #[tabled(rename = "Surface")]
    surface: String,
    #[tabled(rename = "Requires")]
    requires: String,
    #[tabled(rename = "State")]
    state: String,
}

fn gate_for(raw_role: Option<String>) -> AccessGate<SessionRole> {
    let session = SessionRole::default();
    session.set(raw_role);
    AccessGate::new(session)
}

fn describe_role(gate: &AccessGate<SessionRole>, raw: Option<&str>) {
    match (gate.role(), raw) {
        (Some(role), _) => output::print_info(&format!("Role: {}", role)),
        (None, Some(raw)) => {
            output::print_warning(&format!("Unrecognized role {:?}: every capability denied", raw))
        }
        (None, None) => output::print_warning("No role given: every capability denied"),
    }
}

/// Print every capability answer for a role
pub fn execute(raw_role: Option<String>, format: OutputFormat) -> CliResult<()> {
    let gate = gate_for(raw_role.clone());
    let decisions: Vec<AccessDecision> = Capability::ALL
        .into_iter()
        .map(|capability| gate.decide(capability))
        .collect();

    match format {
        OutputFormat::Table => {
            describe_role(&gate, raw_role.as_deref());
            let rows = decisions
                .iter()
                .map(|d| CapabilityRow {
                    capability: d.capability.to_string(),
                    allowed: if d.allowed { "yes" } else { "no" }.to_string(),
                })
                .collect();
            output::print_table(rows);
            Ok(())
        }
        _ => {
            let report = AccessReport {
                raw_role,
                role: gate.role().map(|r| r.to_string()),
                class: gate.classify(),
                decisions,
            };
            output::print_single(&report, format)
        }
    }
}

/// Print how each dashboard surface renders for a role
pub fn execute_surfaces(raw_role: Option<String>, format: OutputFormat) -> CliResult<()> {
    let gate = gate_for(raw_role.clone());
    let role = gate.role();
    let rows: Vec<SurfaceRow> = Surface::ALL
        .into_iter()
        .map(|surface| SurfaceRow {
            surface: format!("{:?}", surface),
            requires: surface.required_capability().to_string(),
            state: match surface.state_for(role) {
                SurfaceState::Enabled => "enabled",
                SurfaceState::Disabled => "disabled",
                SurfaceState::Hidden => "hidden",
            }
            .to_string(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            describe_role(&gate, raw_role.as_deref());
            output::print_table(rows);
            Ok(())
        }
        _ => output::print_single(&rows, format),
    }
}
