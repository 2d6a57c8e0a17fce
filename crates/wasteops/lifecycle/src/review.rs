//! Termination review
//!
//! A review is the single pass a renderer or auditor makes over a batch. It
//! sorts every record into closed, failed or flagged, keeps processing order
//! inside each group, and logs each flagged record as the audit trace.

use crate::batch::{TerminationBatch, TerminationTransition};
use crate::decode::DecodedBatch;
use crate::error::TransitionDefect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasteops_types::{ContractNumber, ContractSnapshot};

/// Review settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOptions {
    /// Flag records whose `new_end_date` is not a readable date
    pub strict_dates: bool,
}

/// Quantity change of a closed contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub original_quantity: f64,
    pub adjusted_quantity: f64,
    pub delta: f64,
}

/// Contract the backend closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedContract {
    pub position: usize,
    pub contract_number: String,

    /// Passed through unmodified
    pub new_end_date: String,

    pub quantity: Option<QuantityChange>,
}

/// Attempt the backend reported as failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedTermination {
    pub position: usize,
    pub contract_number: String,
}

/// Record excluded from every count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTransition {
    pub position: usize,
    pub contract_number: Option<String>,
    pub defect: TransitionDefect,
}

/// Outcome of reviewing one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminationReview {
    pub message: String,
    pub closed: Vec<ClosedContract>,
    pub failed: Vec<FailedTermination>,
    pub flagged: Vec<FlaggedTransition>,
}

impl TerminationReview {
    /// Review a batch without contract snapshots
    pub fn new(batch: &TerminationBatch) -> Self {
        Reviewer::default().review(batch)
    }

    /// Review a decoded batch, keeping original positions and flagging
    /// records that could not be read
    pub fn from_decoded(decoded: &DecodedBatch) -> Self {
        Reviewer::default().review_decoded(decoded)
    }

    pub fn success_count(&self) -> usize {
        self.closed.len()
    }

    pub fn is_displayable(&self) -> bool {
        !self.closed.is_empty()
    }

    pub fn has_flags(&self) -> bool {
        !self.flagged.is_empty()
    }

    /// Tonnes released across all closed contracts
    pub fn total_quantity_released(&self) -> f64 {
        self.closed
            .iter()
            .filter_map(|c| c.quantity.map(|q| q.delta))
            .sum()
    }
}

/// Review with optional contract snapshots and settings
#[derive(Debug, Clone, Default)]
pub struct Reviewer {
    snapshots: HashMap<ContractNumber, ContractSnapshot>,
    options: ReviewOptions,
}

impl Reviewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check closing dates against these contracts
    pub fn with_snapshots(mut self, snapshots: impl IntoIterator<Item = ContractSnapshot>) -> Self {
        self.snapshots = ContractSnapshot::index(snapshots);
        self
    }

    pub fn with_options(mut self, options: ReviewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn review(&self, batch: &TerminationBatch) -> TerminationReview {
        self.collect(&batch.message, batch.terminated.iter().enumerate(), Vec::new())
    }

    pub fn review_decoded(&self, decoded: &DecodedBatch) -> TerminationReview {
        let entries = decoded
            .positions
            .iter()
            .copied()
            .zip(decoded.batch.terminated.iter());
        let unreadable = decoded
            .rejected
            .iter()
            .map(|r| FlaggedTransition {
                position: r.position,
                contract_number: r.contract_number.clone(),
                defect: TransitionDefect::UnreadableRecord {
                    reason: r.reason.clone(),
                },
            })
            .collect();
        self.collect(&decoded.batch.message, entries, unreadable)
    }

    /// Full check of one record: invariants, then date rules
    pub fn check(&self, transition: &TerminationTransition) -> Result<(), TransitionDefect> {
        transition.validate()?;
        let Some(old_contract) = transition.old_contract.as_ref() else {
            return Ok(());
        };

        let snapshot = self
            .snapshots
            .get(&ContractNumber::new(old_contract.contract_number.as_str()));
        if snapshot.is_none() && !self.options.strict_dates {
            return Ok(());
        }

        let new_end_date =
            old_contract
                .parsed_end_date()
                .ok_or_else(|| TransitionDefect::InvalidEndDate {
                    value: old_contract.new_end_date.clone(),
                })?;

        if let Some(snapshot) = snapshot {
            if new_end_date > snapshot.end_date {
                return Err(TransitionDefect::EndDateExtended {
                    new_end_date: old_contract.new_end_date.clone(),
                    end_date: snapshot.end_date.to_string(),
                });
            }
        }
        Ok(())
    }

    fn collect<'a>(
        &self,
        message: &str,
        entries: impl Iterator<Item = (usize, &'a TerminationTransition)>,
        mut flagged: Vec<FlaggedTransition>,
    ) -> TerminationReview {
        let mut review = TerminationReview {
            message: message.to_string(),
            ..Default::default()
        };

        for (position, transition) in entries {
            if let Err(defect) = self.check(transition) {
                flagged.push(FlaggedTransition {
                    position,
                    contract_number: transition.contract_number().map(str::to_string),
                    defect,
                });
                continue;
            }

            // check() guarantees the reference is present
            let Some(old_contract) = transition.old_contract.as_ref() else {
                continue;
            };

            if transition.success {
                let quantity = transition.calculation.map(|c| QuantityChange {
                    original_quantity: c.original_quantity,
                    adjusted_quantity: c.adjusted_quantity,
                    delta: c.original_quantity - c.adjusted_quantity,
                });
                review.closed.push(ClosedContract {
                    position,
                    contract_number: old_contract.contract_number.clone(),
                    new_end_date: old_contract.new_end_date.clone(),
                    quantity,
                });
            } else {
                review.failed.push(FailedTermination {
                    position,
                    contract_number: old_contract.contract_number.clone(),
                });
            }
        }

        flagged.sort_by_key(|f| f.position);
        for entry in &flagged {
            tracing::warn!(
                position = entry.position,
                contract_number = ?entry.contract_number,
                defect = %entry.defect,
                "malformed termination record excluded"
            );
        }

        tracing::debug!(
            closed = review.closed.len(),
            failed = review.failed.len(),
            flagged = flagged.len(),
            "termination batch reviewed"
        );
        review.flagged = flagged;
        review
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{successful_transitions, OldContractRef};
    use crate::decode::decode_batch;
    use chrono::NaiveDate;

    fn batch() -> TerminationBatch {
        TerminationBatch {
            message: "Closed 2 contracts".into(),
            terminated: vec![
                TerminationTransition::succeeded(OldContractRef::new("C-100", "2025-01-15"))
                    .with_calculation(500.0, 320.0),
                TerminationTransition::failed(OldContractRef::new("C-101", "2025-01-15")),
                TerminationTransition::succeeded(OldContractRef::new("C-102", "2025-01-15"))
                    .with_calculation(50.0, 80.0),
                TerminationTransition::succeeded(OldContractRef::new("C-103", "2025-01-20")),
            ],
        }
    }

    #[test]
    fn test_review_partitions_records() {
        let batch = batch();
        let review = TerminationReview::new(&batch);

        assert_eq!(review.success_count(), 2);
        assert_eq!(review.success_count(), successful_transitions(&batch).len());
        assert_eq!(review.closed[0].contract_number, "C-100");
        assert_eq!(review.closed[0].quantity.unwrap().delta, 180.0);
        assert_eq!(review.closed[1].contract_number, "C-103");
        assert!(review.closed[1].quantity.is_none());

        assert_eq!(review.failed.len(), 1);
        assert_eq!(review.failed[0].position, 1);

        assert_eq!(review.flagged.len(), 1);
        assert_eq!(review.flagged[0].position, 2);
        assert_eq!(review.total_quantity_released(), 180.0);
        assert!(review.is_displayable());
    }

    #[test]
    fn test_snapshots_catch_extended_end_dates() {
        let end = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        let reviewer = Reviewer::new().with_snapshots(vec![
            ContractSnapshot::new("C-100", end, 500.0),
            ContractSnapshot::new("C-103", end, 40.0),
        ]);
        let review = reviewer.review(&batch());

        let contracts: Vec<_> = review.closed.iter().map(|c| c.contract_number.as_str()).collect();
        assert_eq!(contracts, vec!["C-100"]);
        assert!(review
            .flagged
            .iter()
            .any(|f| matches!(f.defect, TransitionDefect::EndDateExtended { .. })));
    }

    #[test]
    fn test_strict_dates() {
        let batch = TerminationBatch {
            message: String::new(),
            terminated: vec![TerminationTransition::succeeded(OldContractRef::new(
                "C-1",
                "next month",
            ))],
        };
        assert_eq!(TerminationReview::new(&batch).success_count(), 1);

        let strict = Reviewer::new().with_options(ReviewOptions { strict_dates: true });
        let review = strict.review(&batch);
        assert_eq!(review.success_count(), 0);
        assert_eq!(
            review.flagged[0].defect,
            TransitionDefect::InvalidEndDate {
                value: "next month".into()
            }
        );
        assert!(!review.is_displayable());
    }

    #[test]
    fn test_decoded_review_keeps_original_positions() {
        let json = r#"{"message": "m", "terminated": [
            {"success": true},
            {"success": 1},
            {"success": true, "oldContract": {"contract_number": "C-5", "new_end_date": "2025-05-05"}}
        ]}"#;
        let review = TerminationReview::from_decoded(&decode_batch(json).unwrap());

        assert_eq!(review.closed.len(), 1);
        assert_eq!(review.closed[0].position, 2);
        let positions: Vec<_> = review.flagged.iter().map(|f| f.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(review.flagged[0].defect, TransitionDefect::MissingOldContract);
        assert!(matches!(
            review.flagged[1].defect,
            TransitionDefect::UnreadableRecord { .. }
        ));
    }
}
