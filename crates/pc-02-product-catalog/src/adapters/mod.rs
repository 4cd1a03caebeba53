//! # Adapters
//!
//! Typed access to the product store.

pub mod product_store;

pub use product_store::ProductStore;
