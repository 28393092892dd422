//! HTTP adapter for cycle lifecycle, frozen rubric and export.
//!
//! - `GET    /api/cycles` - all cycles, newest start first
//! - `POST   /api/cycles` - create and freeze the draft rubric
//! - `GET    /api/cycles/active` - the active cycle or `null`
//! - `PUT    /api/cycles/current` - pin or clear the default read cycle
//! - `GET    /api/cycles/:id` - one cycle with its frozen rubric
//! - `PATCH  /api/cycles/:id` - partial update
//! - `POST   /api/cycles/:id/extend` - move the end date forward
//! - `POST   /api/cycles/:id/finalize` - mark done
//! - `DELETE /api/cycles/:id` - cancel with every dependent record
//! - `GET    /api/cycles/:id/rubric` / `PUT` - frozen rubric rows
//! - `GET    /api/cycles/:id/export` - export sheet rows

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::cycle_routes;
