//! HTTP adapter - axum routes over the application handlers.
//!
//! Each area keeps its own `dto`, `handlers` and `routes`; [`api_router`]
//! merges them and [`build_router`] adds the middleware stack.

pub mod cycles;
pub mod dashboard;
pub mod equalization;
pub mod error;
pub mod evaluations;
pub mod router;
pub mod rubric;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use router::{api_router, build_cors_layer, build_router};
pub use state::AppState;
