//! Termination batch model
//!
//! Creating a contract can close the contracts it supersedes. The backend
//! reports those closures as a [`TerminationBatch`]: one entry per attempt,
//! in processing order. The batch is request-scoped and read once.

use crate::error::TransitionDefect;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Result of one auto-termination pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminationBatch {
    /// Backend summary message
    #[serde(default)]
    pub message: String,

    /// Attempts, in processing order
    #[serde(default)]
    pub terminated: Vec<TerminationTransition>,
}

/// One attempt to close a superseded contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationTransition {
    /// Whether the backend closed the contract
    pub success: bool,

    /// Contract being closed
    #[serde(rename = "oldContract", default, skip_serializing_if = "Option::is_none")]
    pub old_contract: Option<OldContractRef>,

    /// Quantity proration, when the backend computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<QuantityCalculation>,
}

/// Reference to the closed contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldContractRef {
    pub contract_number: String,

    /// Closing date exactly as sent by the backend
    pub new_end_date: String,
}

impl OldContractRef {
    pub fn new(contract_number: impl Into<String>, new_end_date: impl Into<String>) -> Self {
        Self {
            contract_number: contract_number.into(),
            new_end_date: new_end_date.into(),
        }
    }

    /// Calendar date of `new_end_date`; accepts a plain date or an RFC 3339
    /// timestamp.
    pub fn parsed_end_date(&self) -> Option<NaiveDate> {
        let raw = self.new_end_date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

/// Committed quantity before and after proration, in tonnes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityCalculation {
    pub original_quantity: f64,
    pub adjusted_quantity: f64,
}

impl QuantityCalculation {
    pub fn new(original_quantity: f64, adjusted_quantity: f64) -> Self {
        Self {
            original_quantity,
            adjusted_quantity,
        }
    }

    /// Check quantity invariants
    pub fn validate(&self) -> Result<(), TransitionDefect> {
        for (field, value) in [
            ("original_quantity", self.original_quantity),
            ("adjusted_quantity", self.adjusted_quantity),
        ] {
            if !value.is_finite() {
                return Err(TransitionDefect::NonFiniteQuantity {
                    field: field.to_string(),
                });
            }
            if value < 0.0 {
                return Err(TransitionDefect::NegativeQuantity {
                    field: field.to_string(),
                    value,
                });
            }
        }
        if self.adjusted_quantity > self.original_quantity {
            return Err(TransitionDefect::QuantityIncreased {
                original: self.original_quantity,
                adjusted: self.adjusted_quantity,
            });
        }
        Ok(())
    }

    /// Quantity released by proration
    pub fn delta(&self) -> Result<f64, TransitionDefect> {
        self.validate()?;
        Ok(self.original_quantity - self.adjusted_quantity)
    }
}

impl TerminationTransition {
    pub fn succeeded(old_contract: OldContractRef) -> Self {
        Self {
            success: true,
            old_contract: Some(old_contract),
            calculation: None,
        }
    }

    pub fn failed(old_contract: OldContractRef) -> Self {
        Self {
            success: false,
            old_contract: Some(old_contract),
            calculation: None,
        }
    }

    pub fn with_calculation(mut self, original_quantity: f64, adjusted_quantity: f64) -> Self {
        self.calculation = Some(QuantityCalculation::new(original_quantity, adjusted_quantity));
        self
    }

    pub fn contract_number(&self) -> Option<&str> {
        self.old_contract.as_ref().map(|c| c.contract_number.as_str())
    }

    /// Check presence and quantity invariants
    pub fn validate(&self) -> Result<(), TransitionDefect> {
        let old_contract = self
            .old_contract
            .as_ref()
            .ok_or(TransitionDefect::MissingOldContract)?;
        if old_contract.contract_number.trim().is_empty() {
            return Err(TransitionDefect::EmptyContractNumber);
        }
        match &self.calculation {
            Some(calculation) => calculation.validate(),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// True when there is nothing to show
pub fn is_empty_batch(batch: Option<&TerminationBatch>) -> bool {
    batch.map_or(true, |b| b.terminated.is_empty())
}

/// Closed contracts, in processing order.
///
/// Failed attempts and malformed records are left out.
pub fn successful_transitions(batch: &TerminationBatch) -> Vec<&TerminationTransition> {
    batch
        .terminated
        .iter()
        .filter(|t| t.success && t.is_valid())
        .collect()
}

/// Number of contracts actually closed
pub fn success_count(batch: &TerminationBatch) -> usize {
    successful_transitions(batch).len()
}

/// Whether the batch should be displayed at all
pub fn is_displayable(batch: Option<&TerminationBatch>) -> bool {
    batch.is_some_and(|b| success_count(b) > 0)
}

/// Quantity released by a transition: `None` without a calculation, a defect
/// when the calculation breaks the proration invariants.
pub fn quantity_delta(transition: &TerminationTransition) -> Result<Option<f64>, TransitionDefect> {
    transition
        .calculation
        .as_ref()
        .map(QuantityCalculation::delta)
        .transpose()
}
