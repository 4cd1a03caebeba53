//! # Core Domain Entities
//!
//! Identity and role primitives shared by the registry components.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `ProductId`, `Timestamp`
//! - **Access Control**: `Role`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte participant identity.
///
/// The all-zero address is the null identity and is never a valid actor.
pub type Address = [u8; 20];

/// A 32-byte globally unique product fingerprint.
pub type ProductId = [u8; 32];

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// The null identity.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Returns true for the null identity.
pub fn is_zero_address(address: &Address) -> bool {
    address.iter().all(|b| *b == 0)
}

/// Builds a `ProductId` from a short label.
///
/// The label's UTF-8 bytes are left-aligned and zero-padded. Labels of 32
/// bytes or more are rejected so that at least one padding byte remains and
/// the label can be recovered with [`product_id_label`].
pub fn product_id_from_label(label: &str) -> Option<ProductId> {
    let bytes = label.as_bytes();
    if bytes.len() >= 32 {
        return None;
    }
    let mut id = [0u8; 32];
    id[..bytes.len()].copy_from_slice(bytes);
    Some(id)
}

/// Recovers the label of a `ProductId` built by [`product_id_from_label`].
///
/// Returns `None` for ids that are not zero-padded UTF-8.
pub fn product_id_label(id: &ProductId) -> Option<&str> {
    let end = id.iter().position(|b| *b == 0).unwrap_or(id.len());
    if id[end..].iter().any(|b| *b != 0) {
        return None;
    }
    std::str::from_utf8(&id[..end]).ok()
}

/// Log-friendly rendering of a product id: its label when it has one,
/// otherwise abbreviated hex.
pub fn display_product_id(id: &ProductId) -> String {
    match product_id_label(id) {
        Some(label) if !label.is_empty() => format!("\"{label}\""),
        _ => short_hex(id),
    }
}

/// Parses a hex address, with or without a `0x` prefix.
pub fn parse_address(value: &str) -> Option<Address> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).ok()?;
    bytes.try_into().ok()
}

/// Abbreviated hex rendering for log lines (`0xaabbccdd…`).
pub fn short_hex(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(4)];
    format!("0x{}…", hex::encode(head))
}

// =============================================================================
// CLUSTER B: ACCESS CONTROL
// =============================================================================

/// Capability category gating write operations.
///
/// A participant holds at most one role at a time. `None` is the zero value
/// reported for unknown participants and is never assignable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    /// No role; the zero value.
    #[default]
    None = 0,
    /// May verify and revoke participants.
    Admin = 1,
    /// May register products.
    Manufacturer = 2,
    /// May append milestones.
    Supplier = 3,
}

impl Role {
    /// Every role, including `None`, in id order.
    pub const ALL: [Role; 4] = [Role::None, Role::Admin, Role::Manufacturer, Role::Supplier];

    /// Stable numeric id used on external surfaces.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Decodes an external role id.
    pub fn from_id(id: u8) -> Option<Role> {
        match id {
            0 => Some(Role::None),
            1 => Some(Role::Admin),
            2 => Some(Role::Manufacturer),
            3 => Some(Role::Supplier),
            _ => None,
        }
    }

    /// Lowercase name used in logs and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Admin => "admin",
            Role::Manufacturer => "manufacturer",
            Role::Supplier => "supplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
