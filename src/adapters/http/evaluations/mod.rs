//! HTTP adapter for evaluation submissions and the user import.
//!
//! - `POST /api/evaluations` - any source kind
//! - `POST /api/evaluations/self-assessment` - evaluator = evaluatee shortcut
//! - `GET  /api/evaluations/pending?evaluator_id=&cycle_id=` - still to fill in
//! - `POST /api/users/import` - normalize import rows

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::evaluation_routes;
