//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresRubricRepository` - taxonomy, draft and frozen rubric rows
//! - `PostgresCycleRepository` - cycles, atomic create-with-snapshot and cancel
//! - `PostgresEvaluationRepository` - headers with JSONB payloads
//! - `PostgresEqualizationRepository` - committee final scores
//! - `PostgresUserDirectory` - users and their active roles
//! - `PostgresSystemSettings` - `system_config` key/value rows

mod cycle_repository;
mod equalization_repository;
mod evaluation_repository;
mod rubric_repository;
mod system_settings;
mod user_directory;

pub use cycle_repository::PostgresCycleRepository;
pub use equalization_repository::PostgresEqualizationRepository;
pub use evaluation_repository::PostgresEvaluationRepository;
pub use rubric_repository::PostgresRubricRepository;
pub use system_settings::PostgresSystemSettings;
pub use user_directory::PostgresUserDirectory;

use crate::domain::foundation::DomainError;

/// Wraps a sqlx error with the failing operation.
fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(context, e)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
