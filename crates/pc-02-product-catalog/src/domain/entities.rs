//! # Product Entities

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, ProductId, Timestamp};

/// An immutable catalog record.
///
/// Never updated or deleted once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Globally unique fingerprint.
    pub id: ProductId,
    /// Display name. Not validated.
    pub name: String,
    /// Manufacturer address recorded at registration.
    pub manufacturer: Address,
    /// Time of registration.
    pub registered_at: Timestamp,
}
