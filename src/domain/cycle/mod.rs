//! Cycle module - evaluation windows and their lifecycle.
//!
//! Phases: Upcoming → Active → Elapsed, with Done reachable by finalization
//! once the cycle has started. Extension can bring an elapsed cycle back to
//! Active. Cancellation deletes the cycle outright.

mod aggregate;
mod phase;
mod view;
mod window;

pub use aggregate::{CycleChanges, CycleConfig, NewCycle};
pub use phase::CyclePhase;
pub use view::CycleView;
pub use window::CycleWindow;
