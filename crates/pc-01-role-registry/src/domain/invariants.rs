//! # Domain Invariants
//!
//! Guard functions run at the start of each mutating operation.

use super::entities::ParticipantStatus;
use super::errors::RoleRegistryError;
use shared_types::entities::{is_zero_address, Address, Role};

/// Roles an admin may grant. `None` is never assignable.
pub const ASSIGNABLE_ROLES: [Role; 3] = [Role::Admin, Role::Manufacturer, Role::Supplier];

/// Decodes an external role id into an assignable role.
pub fn parse_role(role_id: u8) -> Result<Role, RoleRegistryError> {
    match Role::from_id(role_id) {
        Some(role) if ASSIGNABLE_ROLES.contains(&role) => Ok(role),
        _ => Err(RoleRegistryError::InvalidRole { role_id }),
    }
}

/// Invariant: only a verified admin may change verification state.
pub fn invariant_admin(
    caller: &Address,
    caller_status: &ParticipantStatus,
) -> Result<(), RoleRegistryError> {
    if caller_status.holds(Role::Admin) {
        Ok(())
    } else {
        Err(RoleRegistryError::AccessDenied { caller: *caller })
    }
}

/// Invariant: the null identity is never a participant.
pub fn invariant_nonzero(address: &Address) -> Result<(), RoleRegistryError> {
    if is_zero_address(address) {
        Err(RoleRegistryError::InvalidParticipant)
    } else {
        Ok(())
    }
}
