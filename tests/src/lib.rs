//! # Provenance-Chain Test Suite
//!
//! Unified test crate for behaviour that spans components.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Shared container setup
//!     ├── scenarios.rs    # End-to-end registry flows
//!     ├── concurrency.rs  # Racing writers and readers
//!     └── durability.rs   # Reopen and corruption on the file backend
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pc-tests
//!
//! # By category
//! cargo test -p pc-tests integration::scenarios::
//! cargo test -p pc-tests integration::concurrency::
//! cargo test -p pc-tests integration::durability::
//! ```

#![allow(dead_code)]

pub mod integration;
