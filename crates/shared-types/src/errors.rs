//! # Error Types
//!
//! The fatal storage category and the shared classification of domain errors.
//!
//! Component crates define their own `thiserror` enums. Every variant maps to
//! one `ErrorKind`, so external collaborators can branch on a stable code
//! without depending on each component's error type.

use thiserror::Error;

/// Hard failures of the persistence layer.
///
/// These are never expected domain outcomes. A write that fails with a
/// `StorageError` has not been applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("Storage I/O error: {message}")]
    Io { message: String },

    /// Persisted bytes failed an integrity check.
    #[error("Storage corrupted: {message}")]
    Corrupted { message: String },

    /// A value could not be encoded or decoded.
    #[error("Storage codec error: {message}")]
    Codec { message: String },
}

impl StorageError {
    /// Shorthand for an I/O failure.
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io {
            message: message.into(),
        }
    }

    /// Shorthand for a corruption failure.
    pub fn corrupted(message: impl Into<String>) -> Self {
        StorageError::Corrupted {
            message: message.into(),
        }
    }
}

/// Stable classification of every error the registry can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    InvalidRole,
    InvalidParticipant,
    AlreadyVerified,
    NotVerified,
    ProductAlreadyExists,
    ProductNotFound,
    NotVerifiedManufacturer,
    InvalidManufacturer,
    NotVerifiedSupplier,
    InvalidTimestamp,
    EmptyMilestoneType,
    EmptyMilestoneDetails,
    IndexOutOfBounds,
    MissingDependency,
    GateMismatch,
    /// Fatal persistence failure.
    Storage,
}

impl ErrorKind {
    /// Machine-readable code for audit logs and external collaborators.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::InvalidRole => "invalid_role",
            ErrorKind::InvalidParticipant => "invalid_participant",
            ErrorKind::AlreadyVerified => "already_verified",
            ErrorKind::NotVerified => "not_verified",
            ErrorKind::ProductAlreadyExists => "product_already_exists",
            ErrorKind::ProductNotFound => "product_not_found",
            ErrorKind::NotVerifiedManufacturer => "not_verified_manufacturer",
            ErrorKind::InvalidManufacturer => "invalid_manufacturer",
            ErrorKind::NotVerifiedSupplier => "not_verified_supplier",
            ErrorKind::InvalidTimestamp => "invalid_timestamp",
            ErrorKind::EmptyMilestoneType => "empty_milestone_type",
            ErrorKind::EmptyMilestoneDetails => "empty_milestone_details",
            ErrorKind::IndexOutOfBounds => "index_out_of_bounds",
            ErrorKind::MissingDependency => "missing_dependency",
            ErrorKind::GateMismatch => "gate_mismatch",
            ErrorKind::Storage => "storage",
        }
    }

    /// True only for the storage category.
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorKind::Storage)
    }
}

/// Implemented by every component error enum.
pub trait Classified {
    /// The stable kind of this error.
    fn kind(&self) -> ErrorKind;

    /// True when the error is a storage failure rather than a domain outcome.
    fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }
}

impl Classified for StorageError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::io("disk gone");
        assert!(err.to_string().contains("disk gone"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_only_storage_is_fatal() {
        assert!(ErrorKind::Storage.is_fatal());
        assert!(!ErrorKind::ProductNotFound.is_fatal());
        assert!(!ErrorKind::AccessDenied.is_fatal());
    }

    #[test]
    fn test_codes_are_snake_case() {
        assert_eq!(ErrorKind::NotVerifiedSupplier.code(), "not_verified_supplier");
        assert_eq!(ErrorKind::IndexOutOfBounds.code(), "index_out_of_bounds");
    }
}
