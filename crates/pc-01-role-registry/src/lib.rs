//! # PC-01 Role Registry
//!
//! Decides who may act: participant verification and role gating.
//!
//! **Component ID:** 01  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)  
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Every write in the provenance registry starts with a role check against
//! this component. It exclusively owns participant records:
//! - Admins verify and revoke participants
//! - A participant holds at most one role at a time
//! - Revocation keeps the role and `verified_at`; only `verified` flips
//!
//! ## State Machine
//!
//! ```text
//! Unverified ──verify(role)──→ Verified(role)
//!                                  │
//!                               revoke
//!                                  ↓
//!     Verified(new_role) ←─verify── Revoked(role)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! pc-01-role-registry/
//! ├── domain/          # Participant, ParticipantStatus, guards, errors
//! ├── ports/           # RoleVerifier + RoleRegistryApi (inbound), store/time/bus (outbound)
//! ├── adapters/        # ParticipantStore over any KeyValueStore
//! └── application/     # RoleRegistryService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::ParticipantStore;
pub use application::RoleRegistryService;
pub use domain::{
    parse_role, Participant, ParticipantStatus, RoleRegistryError, ASSIGNABLE_ROLES,
};
pub use ports::{MockRoleVerifier, RoleRegistryApi, RoleVerifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
