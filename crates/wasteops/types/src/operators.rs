//! Operator counters
//!
//! The backend reports operator counts keyed by operator type. Only the
//! known kinds are summed; any other key contributes zero to the total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Known operator types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Collector,
    Transporter,
    Treatment,
    FinalDisposal,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 4] = [
        OperatorKind::Collector,
        OperatorKind::Transporter,
        OperatorKind::Treatment,
        OperatorKind::FinalDisposal,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            OperatorKind::Collector => "collector",
            OperatorKind::Transporter => "transporter",
            OperatorKind::Treatment => "treatment",
            OperatorKind::FinalDisposal => "final_disposal",
        }
    }

    pub fn from_key(key: &str) -> Option<OperatorKind> {
        OperatorKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Raw per-type operator counters as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorCounts(BTreeMap<String, u64>);

impl OperatorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, key: impl Into<String>, count: u64) -> Self {
        self.0.insert(key.into(), count);
        self
    }

    /// Count for a known kind (zero when absent)
    pub fn count(&self, kind: OperatorKind) -> u64 {
        self.0.get(kind.key()).copied().unwrap_or(0)
    }

    /// Sum over known kinds; unknown keys contribute zero
    pub fn total(&self) -> u64 {
        OperatorKind::ALL
            .iter()
            .fold(0u64, |acc, kind| acc.saturating_add(self.count(*kind)))
    }

    /// Keys that are not a known operator kind
    pub fn ignored_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| OperatorKind::from_key(key).is_none())
            .collect()
    }
}
