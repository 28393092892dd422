//! HTTP adapter for the draft rubric of each track.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::rubric_routes;
