//! Clock port.
//!
//! Cycle activity is derived from "now", so every handler that needs the
//! current instant receives it through this port.

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
