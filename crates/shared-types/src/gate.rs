//! # Write Gate
//!
//! A single mutex shared by every mutating operation in the registry.
//!
//! Holding the gate makes a multi-component check-then-act sequence (role
//! check, product check, append) one atomic unit. Reads never take it.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use thiserror::Error;

/// A component was wired to a different gate than the component it reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component} does not share the write gate of {upstream}")]
pub struct GateMismatch {
    /// Component being constructed.
    pub component: &'static str,
    /// Component whose gate differs.
    pub upstream: &'static str,
}

/// Cloneable handle to the registry-wide write mutex.
///
/// Clones share the same mutex. The gate is not reentrant: a holder must not
/// call another mutating operation.
#[derive(Clone, Default)]
pub struct WriteGate {
    inner: Arc<Mutex<()>>,
}

impl WriteGate {
    /// Creates a fresh, unshared gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the gate is held.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }

    /// True when both handles guard the same mutex.
    pub fn is_shared_with(&self, other: &WriteGate) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Fails unless `upstream` is absent or guards the same mutex.
    ///
    /// Components that only read through a port report no gate and always pass.
    pub fn ensure_shared(
        &self,
        upstream: Option<&WriteGate>,
        component: &'static str,
        upstream_name: &'static str,
    ) -> Result<(), GateMismatch> {
        match upstream {
            Some(gate) if !self.is_shared_with(gate) => Err(GateMismatch {
                component,
                upstream: upstream_name,
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for WriteGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteGate")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
