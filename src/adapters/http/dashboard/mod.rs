//! HTTP adapter for read-only aggregates.
//!
//! Every endpoint taking `?cycle=` accepts a numeric id or a cycle name; when
//! omitted the configured current cycle, then the latest cycle with
//! evaluations, is used.
//!
//! - `GET /api/dashboard/stats`
//! - `GET /api/dashboard/roles`
//! - `GET /api/dashboard/committee`
//! - `GET /api/dashboard/collaborators/:id/summary`
//! - `GET /api/dashboard/collaborators/:id/evolution?cycles=1,2`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::dashboard_routes;
