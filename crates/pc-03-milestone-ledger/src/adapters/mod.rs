//! # Adapters
//!
//! Typed access to the per-product milestone sequences.

pub mod milestone_store;

pub use milestone_store::MilestoneStore;
