//! # Domain Errors
//!
//! Error types for the role registry.

use shared_types::entities::{short_hex, Address};
use shared_types::errors::{Classified, ErrorKind, StorageError};
use thiserror::Error;

/// Role registry error types.
///
/// Every variant except `Storage` is an expected, non-retriable domain
/// outcome. A failed call leaves the registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleRegistryError {
    /// Caller is not a verified admin.
    #[error("Access denied: {} is not a verified admin", short_hex(.caller))]
    AccessDenied {
        /// The rejected caller.
        caller: Address,
    },

    /// Target address is the null identity.
    #[error("Invalid participant: zero address")]
    InvalidParticipant,

    /// Role is not in the assignable set.
    #[error("Invalid role id {role_id}")]
    InvalidRole {
        /// The rejected role id.
        role_id: u8,
    },

    /// Participant is already verified (in any role).
    #[error("Participant {} is already verified", short_hex(.address))]
    AlreadyVerified {
        /// The participant.
        address: Address,
    },

    /// Participant is not currently verified.
    #[error("Participant {} is not verified", short_hex(.address))]
    NotVerified {
        /// The participant.
        address: Address,
    },

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Classified for RoleRegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::InvalidParticipant => ErrorKind::InvalidParticipant,
            Self::InvalidRole { .. } => ErrorKind::InvalidRole,
            Self::AlreadyVerified { .. } => ErrorKind::AlreadyVerified,
            Self::NotVerified { .. } => ErrorKind::NotVerified,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
