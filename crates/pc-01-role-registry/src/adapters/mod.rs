//! # Adapters
//!
//! Typed access to the participant store.

pub mod participant_store;

pub use participant_store::ParticipantStore;
