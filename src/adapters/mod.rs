//! Adapters - implementations of the port interfaces.
//!
//! - `postgres` - sqlx repositories over PostgreSQL
//! - `memory` - shared in-memory store for tests and local runs
//! - `clock` - system and fixed clocks
//! - `http` - axum routes, state and error mapping

pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;
