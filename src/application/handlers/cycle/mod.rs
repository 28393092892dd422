//! Cycle command and query handlers.

// Command handlers
mod cancel_cycle;
mod create_cycle;
mod extend_cycle;
mod finalize_cycle;
mod set_current_cycle;
mod update_cycle;

// Query handlers
mod get_cycle;
mod list_cycles;

pub(crate) mod guard;

pub use cancel_cycle::{CancelCycleCommand, CancelCycleHandler, CancelCycleResult};
pub use create_cycle::{CreateCycleCommand, CreateCycleHandler, CreateCycleResult};
pub use extend_cycle::{ExtendCycleCommand, ExtendCycleHandler};
pub use finalize_cycle::{FinalizeCycleCommand, FinalizeCycleHandler};
pub use get_cycle::{GetCycleHandler, GetCycleQuery};
pub use list_cycles::{FindActiveCycleHandler, ListCyclesHandler};
pub use set_current_cycle::{SetCurrentCycleCommand, SetCurrentCycleHandler};
pub use update_cycle::{UpdateCycleCommand, UpdateCycleHandler};
