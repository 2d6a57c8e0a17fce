//! # WasteOps Lifecycle
//!
//! Data contract for contract auto-termination results.
//!
//! When the backend creates a contract that supersedes older ones, it closes
//! those contracts early and prorates their committed quantity. It reports
//! what happened as a [`TerminationBatch`]. This crate never performs the
//! termination; it decides what the batch means so every renderer and
//! auditor reports the same thing:
//!
//! - [`successful_transitions`] / [`success_count`]: the only trustworthy
//!   count of contracts closed
//! - [`quantity_delta`]: tonnes released by proration, or a defect
//! - [`decode_batch`]: record-by-record decoding with partial-failure isolation
//! - [`TerminationReview`]: closed / failed / flagged, in processing order
//!
//! ## Example
//!
//! ```rust
//! use wasteops_lifecycle::{decode_batch, quantity_delta, success_count, TerminationReview};
//!
//! let json = r#"{
//!     "message": "Closed 2 contracts",
//!     "terminated": [
//!         {"success": true,
//!          "oldContract": {"contract_number": "C-100", "new_end_date": "2025-01-15"},
//!          "calculation": {"original_quantity": 500, "adjusted_quantity": 320}},
//!         {"success": false,
//!          "oldContract": {"contract_number": "C-101", "new_end_date": "2025-01-15"}}
//!     ]
//! }"#;
//!
//! let decoded = decode_batch(json).unwrap();
//! assert_eq!(success_count(&decoded.batch), 1);
//! assert_eq!(quantity_delta(&decoded.batch.terminated[0]), Ok(Some(180.0)));
//!
//! let review = TerminationReview::from_decoded(&decoded);
//! assert_eq!(review.failed[0].contract_number, "C-101");
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod batch;
pub mod decode;
pub mod error;
pub mod review;

pub use batch::{
    is_displayable, is_empty_batch, quantity_delta, success_count, successful_transitions,
    OldContractRef, QuantityCalculation, TerminationBatch, TerminationTransition,
};
pub use decode::{decode_batch, decode_value, DecodedBatch, RejectedRecord};
pub use error::{LifecycleError, Result, TransitionDefect};
pub use review::{
    ClosedContract, FailedTermination, FlaggedTransition, QuantityChange, ReviewOptions,
    Reviewer, TerminationReview,
};
