use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// Ownership mismatches are deliberately reported as [`CoreError::NotFound`]
/// so non-owners cannot distinguish a foreign contract from a missing one.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
