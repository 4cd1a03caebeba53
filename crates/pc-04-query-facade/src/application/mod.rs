//! Application layer.

pub mod facade;

pub use facade::{QueryFacade, QueryFacadeBuilder};
