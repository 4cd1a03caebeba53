//! # Participant Entities
//!
//! The record owned by the role registry and the status view it exposes.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Role, Timestamp};

/// A stored participant record.
///
/// Created on first verification and never deleted. `role` and
/// `verified_at` survive revocation; only `verified` flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity key.
    pub address: Address,
    /// Most recently assigned role.
    pub role: Role,
    /// Whether the participant may currently act in `role`.
    pub verified: bool,
    /// Time of the most recent verification.
    pub verified_at: Timestamp,
}

impl Participant {
    /// A freshly verified participant.
    pub fn verified(address: Address, role: Role, now: Timestamp) -> Self {
        Self {
            address,
            role,
            verified: true,
            verified_at: now,
        }
    }

    /// The same record with verification cleared.
    pub fn revoked(self) -> Self {
        Self {
            verified: false,
            ..self
        }
    }

    /// Read-only view of this record.
    pub fn status(&self) -> ParticipantStatus {
        ParticipantStatus {
            role: self.role,
            verified: self.verified,
            verified_at: self.verified_at,
        }
    }
}

/// Result of a status query.
///
/// Unknown addresses report the zero value: role `None`, unverified, time 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantStatus {
    /// Assigned role, `None` if never verified.
    pub role: Role,
    /// Current verification flag.
    pub verified: bool,
    /// Time of the most recent verification, 0 if never verified.
    pub verified_at: Timestamp,
}

impl ParticipantStatus {
    /// True iff verified and holding exactly `role`.
    pub fn holds(&self, role: Role) -> bool {
        self.verified && self.role == role
    }
}
