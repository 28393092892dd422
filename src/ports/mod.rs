//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `RubricRepository` - Taxonomy, draft rubric, frozen cycle rubric
//! - `CycleRepository` - Cycle lifecycle, atomic create/cancel
//! - `EvaluationRepository` - Evaluation headers and payloads
//! - `EqualizationRepository` - Committee final scores and their edit history
//!
//! ## Reference Ports
//!
//! - `UserDirectory` - User profiles and roles
//! - `SystemSettings` - Configured current cycle
//! - `Clock` - Current instant

mod clock;
mod cycle_repository;
mod equalization_repository;
mod evaluation_repository;
mod rubric_repository;
mod system_settings;
mod user_directory;

pub use clock::Clock;
pub use cycle_repository::{CancelledCycle, CycleRepository};
pub use equalization_repository::EqualizationRepository;
pub use evaluation_repository::EvaluationRepository;
pub use rubric_repository::RubricRepository;
pub use system_settings::SystemSettings;
pub use user_directory::UserDirectory;
