//! Error types for termination batches
//!
//! Two levels: [`TransitionDefect`] describes one bad record and never stops
//! the batch; [`LifecycleError`] is reserved for payloads that are not a
//! batch at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single termination record cannot be trusted
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionDefect {
    /// Record has no `oldContract`
    #[error("Missing old contract reference")]
    MissingOldContract,

    /// `contract_number` is blank
    #[error("Empty contract number")]
    EmptyContractNumber,

    /// A quantity is below zero
    #[error("Negative {field}: {value}")]
    NegativeQuantity { field: String, value: f64 },

    /// A quantity is NaN or infinite
    #[error("Non-finite {field}")]
    NonFiniteQuantity { field: String },

    /// Proration increased the committed quantity
    #[error("Adjusted quantity {adjusted} exceeds original quantity {original}")]
    QuantityIncreased { original: f64, adjusted: f64 },

    /// `new_end_date` is not an ISO-8601 date
    #[error("Unreadable end date: {value:?}")]
    InvalidEndDate { value: String },

    /// Closing date lies after the contract's original end date
    #[error("New end date {new_end_date} is after original end date {end_date}")]
    EndDateExtended {
        new_end_date: String,
        end_date: String,
    },

    /// Record could not be decoded
    #[error("Unreadable record: {reason}")]
    UnreadableRecord { reason: String },
}

/// Batch-level errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Payload is not shaped like a termination batch
    #[error("Invalid termination batch: {reason}")]
    InvalidEnvelope { reason: String },

    /// Payload is not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for batch decoding
pub type Result<T> = std::result::Result<T, LifecycleError>;
