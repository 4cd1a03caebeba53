//! # Inbound Ports
//!
//! What the role registry offers to the rest of the system.
//!
//! Downstream components receive only [`RoleVerifier`], so they can check
//! roles but can never verify or revoke anyone.

use crate::domain::{ParticipantStatus, RoleRegistryError};
use parking_lot::RwLock;
use shared_bus::{ParticipantVerified, VerificationRevoked};
use shared_types::entities::{Address, Role};
use shared_types::errors::StorageError;
use shared_types::gate::WriteGate;
use std::collections::HashMap;

/// Read capability over participant roles.
pub trait RoleVerifier: Send + Sync {
    /// True iff `address` is verified and its stored role equals `role`.
    fn is_verified_for_role(&self, address: &Address, role: Role) -> Result<bool, StorageError>;

    /// Status of `address`. Unknown addresses report the zero value.
    fn get_participant_status(&self, address: &Address)
        -> Result<ParticipantStatus, StorageError>;

    /// Gate guarding the writes behind these answers, if any.
    ///
    /// Components that act on a role check must hold this same gate.
    fn write_gate(&self) -> Option<&WriteGate> {
        None
    }
}

/// Role Registry API - inbound port.
pub trait RoleRegistryApi: RoleVerifier {
    /// Verify `address` for `role`. Admin only.
    ///
    /// Check order: `AccessDenied`, `InvalidParticipant`, `InvalidRole`,
    /// `AlreadyVerified`.
    fn verify_participant(
        &self,
        caller: &Address,
        address: Address,
        role: Role,
    ) -> Result<ParticipantVerified, RoleRegistryError>;

    /// Same as [`verify_participant`](Self::verify_participant) with the
    /// role given by its external id. Unknown ids and `None` (0) fail with
    /// `InvalidRole`, after the caller and address checks.
    fn verify_participant_by_id(
        &self,
        caller: &Address,
        address: Address,
        role_id: u8,
    ) -> Result<ParticipantVerified, RoleRegistryError>;

    /// Clear verification for `address`, keeping its role. Admin only.
    ///
    /// Check order: `AccessDenied`, `InvalidParticipant`, `NotVerified`.
    fn revoke_verification(
        &self,
        caller: &Address,
        address: Address,
    ) -> Result<VerificationRevoked, RoleRegistryError>;

    /// Every role except `None`.
    fn get_assignable_roles(&self) -> Vec<Role>;

    /// Number of participant records, verified or not.
    fn participant_count(&self) -> Result<u64, StorageError>;
}

// =============================================================================
// Mock Implementation (for downstream tests)
// =============================================================================

/// In-memory role verifier with directly settable statuses.
#[derive(Debug, Default)]
pub struct MockRoleVerifier {
    statuses: RwLock<HashMap<Address, ParticipantStatus>>,
    fail_with: RwLock<Option<StorageError>>,
}

impl MockRoleVerifier {
    /// Creates an empty verifier; every address is unverified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `address` verified for `role`.
    pub fn grant(&self, address: Address, role: Role) {
        self.statuses.write().insert(
            address,
            ParticipantStatus {
                role,
                verified: true,
                verified_at: 0,
            },
        );
    }

    /// Clears verification for `address`, keeping its role.
    pub fn revoke(&self, address: &Address) {
        if let Some(status) = self.statuses.write().get_mut(address) {
            status.verified = false;
        }
    }

    /// Makes every subsequent query fail with `error`.
    pub fn fail_with(&self, error: StorageError) {
        *self.fail_with.write() = Some(error);
    }

    fn check_failure(&self) -> Result<(), StorageError> {
        match self.fail_with.read().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl RoleVerifier for MockRoleVerifier {
    fn is_verified_for_role(&self, address: &Address, role: Role) -> Result<bool, StorageError> {
        Ok(self.get_participant_status(address)?.holds(role))
    }

    fn get_participant_status(
        &self,
        address: &Address,
    ) -> Result<ParticipantStatus, StorageError> {
        self.check_failure()?;
        Ok(self
            .statuses
            .read()
            .get(address)
            .copied()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_grant_and_revoke() {
        let mock = MockRoleVerifier::new();
        let addr = [5u8; 20];

        assert!(!mock.is_verified_for_role(&addr, Role::Supplier).unwrap());
        mock.grant(addr, Role::Supplier);
        assert!(mock.is_verified_for_role(&addr, Role::Supplier).unwrap());
        assert!(!mock.is_verified_for_role(&addr, Role::Admin).unwrap());

        mock.revoke(&addr);
        let status = mock.get_participant_status(&addr).unwrap();
        assert!(!status.verified);
        assert_eq!(status.role, Role::Supplier);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockRoleVerifier::new();
        mock.fail_with(StorageError::io("offline"));
        assert!(mock.is_verified_for_role(&[1; 20], Role::Admin).is_err());
    }
}
