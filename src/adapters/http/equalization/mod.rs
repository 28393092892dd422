//! HTTP adapter for committee equalization.
//!
//! - `POST /api/equalizations` - first final score for a collaborator
//! - `PUT  /api/equalizations` - revise an existing one
//! - `GET  /api/equalizations?cycle_id=&collaborator_id=` - `null` when absent
//! - `GET  /api/equalizations/history?cycle_id=&collaborator_id=` - edits, newest first

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::equalization_routes;
