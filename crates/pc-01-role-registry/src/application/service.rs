//! # Role Registry Service
//!
//! Application service owning participant records.
//!
//! Writes hold the registry-wide `WriteGate` for their whole check-then-act
//! sequence and publish their event before releasing it. Reads take only
//! the store's read lock.

use parking_lot::RwLock;
use shared_bus::{
    EventPublisher, InMemoryEventBus, ParticipantVerified, ProvenanceEvent, VerificationRevoked,
};
use shared_types::entities::{short_hex, Address, Role};
use shared_types::errors::{Classified, StorageError};
use shared_types::gate::WriteGate;
use shared_types::storage::KeyValueStore;
use shared_types::time::TimeSource;
use std::sync::Arc;

use crate::adapters::ParticipantStore;
use crate::domain::{
    invariant_admin, invariant_nonzero, parse_role, Participant, ParticipantStatus,
    RoleRegistryError, ASSIGNABLE_ROLES,
};
use crate::ports::{RoleRegistryApi, RoleVerifier};

/// Role Registry Service - owns and gates participant records.
pub struct RoleRegistryService<S: KeyValueStore> {
    /// Participant records.
    store: RwLock<ParticipantStore<S>>,
    /// Registry-wide writer mutex.
    gate: WriteGate,
    /// Source of `verified_at`.
    time: Arc<dyn TimeSource>,
    /// Event sink.
    publisher: Arc<dyn EventPublisher>,
}

impl<S: KeyValueStore> RoleRegistryService<S> {
    /// Open the registry over `kv`, serializing writes on `gate`.
    ///
    /// When the store holds no participants yet, `genesis_admin` is recorded
    /// as a verified admin. A store that already holds participants is left
    /// untouched.
    pub fn new(
        kv: S,
        genesis_admin: Address,
        gate: WriteGate,
        time: Arc<dyn TimeSource>,
    ) -> Result<Self, RoleRegistryError> {
        invariant_nonzero(&genesis_admin)?;

        let mut store = ParticipantStore::new(kv);
        let existing = store.count()?;
        if existing == 0 {
            let admin = Participant::verified(genesis_admin, Role::Admin, time.now());
            store.put(&admin)?;
            tracing::info!(
                "[pc-01] Bootstrapped genesis admin {}",
                short_hex(&genesis_admin)
            );
        } else {
            tracing::info!("[pc-01] Loaded {} existing participants", existing);
            if !store
                .get(&genesis_admin)?
                .is_some_and(|p| p.status().holds(Role::Admin))
            {
                tracing::warn!(
                    "[pc-01] Configured admin {} is not a verified admin in the existing store",
                    short_hex(&genesis_admin)
                );
            }
        }

        Ok(Self {
            store: RwLock::new(store),
            gate,
            time,
            publisher: Arc::new(InMemoryEventBus::new()),
        })
    }

    /// Publish events to `publisher` instead of a private bus.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    fn status_of(&self, address: &Address) -> Result<ParticipantStatus, StorageError> {
        Ok(self
            .store
            .read()
            .get(address)?
            .map(|p| p.status())
            .unwrap_or_default())
    }

    fn try_verify(
        &self,
        caller: &Address,
        address: Address,
        role_id: u8,
    ) -> Result<ParticipantVerified, RoleRegistryError> {
        invariant_admin(caller, &self.status_of(caller)?)?;
        invariant_nonzero(&address)?;
        let role = parse_role(role_id)?;

        if self.status_of(&address)?.verified {
            return Err(RoleRegistryError::AlreadyVerified { address });
        }

        let participant = Participant::verified(address, role, self.time.now());
        self.store.write().put(&participant)?;

        Ok(ParticipantVerified { address, role })
    }

    fn try_revoke(
        &self,
        caller: &Address,
        address: Address,
    ) -> Result<VerificationRevoked, RoleRegistryError> {
        invariant_admin(caller, &self.status_of(caller)?)?;
        invariant_nonzero(&address)?;

        let current = self
            .store
            .read()
            .get(&address)?
            .filter(|p| p.verified)
            .ok_or(RoleRegistryError::NotVerified { address })?;

        self.store.write().put(&current.revoked())?;

        Ok(VerificationRevoked { address })
    }

    fn verify(
        &self,
        caller: &Address,
        address: Address,
        role_id: u8,
    ) -> Result<ParticipantVerified, RoleRegistryError> {
        let _gate = self.gate.acquire();

        match self.try_verify(caller, address, role_id) {
            Ok(event) => {
                tracing::info!(
                    "[pc-01] ✅ Verified {} as {}",
                    short_hex(&address),
                    event.role
                );
                self.publisher.publish(ProvenanceEvent::from(event));
                Ok(event)
            }
            Err(err) => {
                self.log_rejection("Verify", &address, &err);
                Err(err)
            }
        }
    }

    fn log_rejection(&self, operation: &str, address: &Address, err: &RoleRegistryError) {
        if err.is_fatal() {
            tracing::error!(
                "[pc-01] {} {} failed: {}",
                operation,
                short_hex(address),
                err
            );
        } else {
            tracing::warn!(
                "[pc-01] {} {} rejected: {}",
                operation,
                short_hex(address),
                err
            );
        }
    }
}

impl<S: KeyValueStore> RoleVerifier for RoleRegistryService<S> {
    fn is_verified_for_role(&self, address: &Address, role: Role) -> Result<bool, StorageError> {
        Ok(self.status_of(address)?.holds(role))
    }

    fn get_participant_status(
        &self,
        address: &Address,
    ) -> Result<ParticipantStatus, StorageError> {
        self.status_of(address)
    }

    fn write_gate(&self) -> Option<&WriteGate> {
        Some(&self.gate)
    }
}

impl<S: KeyValueStore> RoleRegistryApi for RoleRegistryService<S> {
    fn verify_participant(
        &self,
        caller: &Address,
        address: Address,
        role: Role,
    ) -> Result<ParticipantVerified, RoleRegistryError> {
        self.verify(caller, address, role.id())
    }

    fn verify_participant_by_id(
        &self,
        caller: &Address,
        address: Address,
        role_id: u8,
    ) -> Result<ParticipantVerified, RoleRegistryError> {
        self.verify(caller, address, role_id)
    }

    fn revoke_verification(
        &self,
        caller: &Address,
        address: Address,
    ) -> Result<VerificationRevoked, RoleRegistryError> {
        let _gate = self.gate.acquire();

        match self.try_revoke(caller, address) {
            Ok(event) => {
                tracing::info!("[pc-01] Revoked verification of {}", short_hex(&address));
                self.publisher.publish(ProvenanceEvent::from(event));
                Ok(event)
            }
            Err(err) => {
                self.log_rejection("Revoke", &address, &err);
                Err(err)
            }
        }
    }

    fn get_assignable_roles(&self) -> Vec<Role> {
        ASSIGNABLE_ROLES.to_vec()
    }

    fn participant_count(&self) -> Result<u64, StorageError> {
        self.store.read().count()
    }
}
