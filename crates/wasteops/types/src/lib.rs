//! WasteOps Types - Shared vocabulary for the waste-management dashboard core
//!
//! These types are consumed by the authorization engine and by the contract
//! lifecycle model. Nothing in this crate performs I/O; every value is a
//! read-only snapshot of data owned by the backend.
//!
//! ## Key Concepts
//!
//! - **Role**: the single authorization class of an authenticated session
//! - **ContractSnapshot**: the display-time view of a contract
//! - **InstitutionDirectory**: institution reference list with unique ids
//! - **OperatorCounts**: per-kind operator counters and their total

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod contract;
pub mod error;
pub mod institution;
pub mod operators;
pub mod role;

pub use contract::{ContractNumber, ContractSnapshot};
pub use error::{Result, TypesError};
pub use institution::{InstitutionDirectory, InstitutionId, InstitutionOption, InstitutionRef};
pub use operators::{OperatorCounts, OperatorKind};
pub use role::Role;
