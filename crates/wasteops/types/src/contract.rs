//! Contract snapshots
//!
//! Contracts are owned by the backend. The core only ever sees the fields it
//! needs to audit a termination: the number, the end date and the committed
//! quantity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Contract identifier, unique within the system
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractNumber(String);

impl ContractNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContractNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Read-only view of a contract at display time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSnapshot {
    /// Contract number
    pub contract_number: ContractNumber,

    /// Original end date
    pub end_date: NaiveDate,

    /// Committed quantity in tonnes
    pub committed_quantity: f64,
}

impl ContractSnapshot {
    pub fn new(
        contract_number: impl Into<String>,
        end_date: NaiveDate,
        committed_quantity: f64,
    ) -> Self {
        Self {
            contract_number: ContractNumber::new(contract_number),
            end_date,
            committed_quantity,
        }
    }

    /// Index snapshots by contract number.
    ///
    /// Later snapshots replace earlier ones with the same number.
    pub fn index(
        snapshots: impl IntoIterator<Item = ContractSnapshot>,
    ) -> HashMap<ContractNumber, ContractSnapshot> {
        snapshots
            .into_iter()
            .map(|snapshot| (snapshot.contract_number.clone(), snapshot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserializes_iso_dates() {
        let json = r#"{"contract_number":"C-100","end_date":"2025-06-30","committed_quantity":500.0}"#;
        let snapshot: ContractSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.contract_number.as_str(), "C-100");
        assert_eq!(snapshot.end_date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn test_index_by_number() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let index = ContractSnapshot::index(vec![
            ContractSnapshot::new("C-1", date, 10.0),
            ContractSnapshot::new("C-2", date, 20.0),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&ContractNumber::from("C-2")].committed_quantity, 20.0);
    }
}
