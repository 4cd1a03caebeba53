//! Application layer.

pub mod service;

pub use service::RoleRegistryService;
