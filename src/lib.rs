//! Review Cycles - performance evaluation cycles and score aggregation
//!
//! Cycles freeze the active rubric into a per-cycle snapshot, collect
//! evaluations from several sources (self-assessment, 360 peers, mentoring,
//! references, managers and leaders) and let a committee record one
//! equalized final score per collaborator.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`] - value objects, aggregates and pure aggregation rules
//! - [`ports`] - repository and clock traits
//! - [`application`] - command and query handlers
//! - [`adapters`] - PostgreSQL, in-memory, clock and HTTP implementations
//! - [`config`] - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
