//! Error types for shared WasteOps data

use thiserror::Error;

/// Errors raised while building shared reference data
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Role string is not one of the enumerated roles
    #[error("Unknown role: {value:?}")]
    UnknownRole { value: String },

    /// Two institution records share the same id
    #[error("Duplicate institution id: {id}")]
    DuplicateInstitution { id: i64 },

    /// Reference payload does not have a recognized shape
    #[error("Invalid reference payload: {reason}")]
    InvalidPayload { reason: String },
}

/// Result type for shared data operations
pub type Result<T> = std::result::Result<T, TypesError>;
