//! # Aggregated Views

use pc_02_product_catalog::Product;
use pc_03_milestone_ledger::Milestone;
use serde::{Deserialize, Serialize};

/// A product together with its full milestone history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProvenance {
    /// The catalog record.
    pub product: Product,
    /// Every milestone, in submission order.
    pub milestones: Vec<Milestone>,
}

impl ProductProvenance {
    /// The most recent milestone, if any.
    pub fn latest(&self) -> Option<&Milestone> {
        self.milestones.last()
    }
}
