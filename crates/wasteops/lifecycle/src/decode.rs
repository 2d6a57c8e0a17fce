//! Record-by-record batch decoding
//!
//! Decoding the batch in one `serde_json::from_str` call would throw away
//! every record because of a single bad one. Here only the envelope must be
//! well formed; each record is decoded on its own and unreadable records are
//! kept aside with their original position.

use crate::batch::{TerminationBatch, TerminationTransition};
use crate::error::{LifecycleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record that could not be decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// Position in the original `terminated` array
    pub position: usize,

    /// Contract number, when it could still be read
    pub contract_number: Option<String>,

    pub reason: String,
}

/// Batch with readable records plus everything that was set aside
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBatch {
    pub batch: TerminationBatch,

    /// Original position of each entry of `batch.terminated`
    pub positions: Vec<usize>,

    pub rejected: Vec<RejectedRecord>,
}

impl DecodedBatch {
    /// Entries as they were sent
    pub fn record_count(&self) -> usize {
        self.batch.terminated.len() + self.rejected.len()
    }
}

/// Decode a batch from JSON text
pub fn decode_batch(json: &str) -> Result<DecodedBatch> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(value)
}

/// Decode a batch from an already parsed JSON value
pub fn decode_value(value: Value) -> Result<DecodedBatch> {
    let Value::Object(mut envelope) = value else {
        return Err(LifecycleError::InvalidEnvelope {
            reason: "expected a JSON object".into(),
        });
    };

    let message = match envelope.remove("message") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(message)) => message,
        Some(other) => {
            return Err(LifecycleError::InvalidEnvelope {
                reason: format!("`message` must be a string, got {}", kind_of(&other)),
            })
        }
    };

    let records = match envelope.remove("terminated") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(LifecycleError::InvalidEnvelope {
                reason: format!("`terminated` must be an array, got {}", kind_of(&other)),
            })
        }
    };

    let mut decoded = DecodedBatch {
        batch: TerminationBatch {
            message,
            terminated: Vec::with_capacity(records.len()),
        },
        positions: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };

    for (position, record) in records.into_iter().enumerate() {
        let contract_number = record
            .pointer("/oldContract/contract_number")
            .and_then(Value::as_str)
            .map(str::to_string);

        match serde_json::from_value::<TerminationTransition>(record) {
            Ok(transition) => {
                decoded.batch.terminated.push(transition);
                decoded.positions.push(position);
            }
            Err(e) => {
                tracing::warn!(
                    position,
                    contract_number = ?contract_number,
                    error = %e,
                    "unreadable termination record"
                );
                decoded.rejected.push(RejectedRecord {
                    position,
                    contract_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        readable = decoded.batch.terminated.len(),
        rejected = decoded.rejected.len(),
        "termination batch decoded"
    );
    Ok(decoded)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
