//! PostgreSQL implementation of SystemSettings over `system_config`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::foundation::DomainError;
use crate::ports::SystemSettings;

const CURRENT_CYCLE_KEY: &str = "current_cycle";

#[derive(Clone)]
pub struct PostgresSystemSettings {
    pool: PgPool,
}

impl PostgresSystemSettings {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SystemSettings for PostgresSystemSettings {
    async fn current_cycle_name(&self) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar("SELECT value FROM system_config WHERE key = $1")
            .bind(CURRENT_CYCLE_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to read current cycle"))
    }

    async fn set_current_cycle_name(&self, name: Option<&str>) -> Result<(), DomainError> {
        match name {
            Some(name) => {
                sqlx::query(
                    r#"
                    INSERT INTO system_config (key, value) VALUES ($1, $2)
                    ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
                    "#,
                )
                .bind(CURRENT_CYCLE_KEY)
                .bind(name)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to store current cycle"))?;
            }
            None => {
                sqlx::query("DELETE FROM system_config WHERE key = $1")
                    .bind(CURRENT_CYCLE_KEY)
                    .execute(&self.pool)
                    .await
                    .map_err(db_error("Failed to clear current cycle"))?;
            }
        }
        Ok(())
    }
}
