//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::{db_error, is_unique_violation};
use crate::domain::cycle::{CycleConfig, CycleWindow, NewCycle};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp};
use crate::ports::{CancelledCycle, CycleRepository};

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CYCLE_COLUMNS: &str =
    "id, name, description, start_date, end_date, done, created_at, updated_at";

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn create_with_snapshot(&self, new: NewCycle, now: Timestamp) -> Result<CycleConfig, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let row = sqlx::query(
            r#"
            INSERT INTO cycle_configs (name, description, start_date, end_date, done, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING id
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.window.start().as_datetime())
        .bind(new.window.end().as_datetime())
        .bind(now.as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(&new.name)
            } else {
                DomainError::database("Failed to insert cycle", e)
            }
        })?;
        let id = CycleId::from_raw(row.get("id"));

        sqlx::query(
            r#"
            INSERT INTO cycle_rubric_rows (cycle_id, track_id, criterion_id, weight, is_active)
            SELECT $1, track_id, criterion_id, weight, is_active
            FROM track_criterion_weights
            "#,
        )
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to snapshot rubric"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(CycleConfig::create(id, new, now))
    }

    async fn update(&self, cycle: &CycleConfig) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE cycle_configs SET
                name = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                done = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(cycle.id().as_i64())
        .bind(cycle.name())
        .bind(cycle.description())
        .bind(cycle.start_date().as_datetime())
        .bind(cycle.end_date().as_datetime())
        .bind(cycle.is_done())
        .bind(cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_name(cycle.name())
            } else {
                DomainError::database("Failed to update cycle", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(cycle.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CycleId) -> Result<Option<CycleConfig>, DomainError> {
        let sql = format!("SELECT {CYCLE_COLUMNS} FROM cycle_configs WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch cycle"))?;

        row.map(row_to_cycle).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CycleConfig>, DomainError> {
        let sql = format!("SELECT {CYCLE_COLUMNS} FROM cycle_configs WHERE name = $1");
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch cycle by name"))?;

        row.map(row_to_cycle).transpose()
    }

    async fn list(&self) -> Result<Vec<CycleConfig>, DomainError> {
        let sql = format!(
            "SELECT {CYCLE_COLUMNS} FROM cycle_configs ORDER BY start_date DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list cycles"))?;

        rows.into_iter().map(row_to_cycle).collect()
    }

    async fn cancel(&self, id: CycleId) -> Result<CancelledCycle, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let equalizations = sqlx::query("DELETE FROM equalizations WHERE cycle_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete equalizations"))?;

        sqlx::query(
            r#"
            DELETE FROM evaluation_payloads
            WHERE evaluation_id IN (SELECT id FROM evaluations WHERE cycle_id = $1)
            "#,
        )
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete evaluation payloads"))?;

        let evaluations = sqlx::query("DELETE FROM evaluations WHERE cycle_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete evaluations"))?;

        let rubric_rows = sqlx::query("DELETE FROM cycle_rubric_rows WHERE cycle_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete cycle rubric"))?;

        let cycle = sqlx::query("DELETE FROM cycle_configs WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete cycle"))?;

        // Dropping the transaction rolls back the deletes above.
        if cycle.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(CancelledCycle {
            cycle_id: id,
            evaluations_removed: evaluations.rows_affected(),
            equalizations_removed: equalizations.rows_affected(),
            rubric_rows_removed: rubric_rows.rows_affected(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn duplicate_name(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateCycleName,
        format!("A cycle named '{}' already exists", name),
    )
    .with_detail("name", name)
}

fn not_found(id: CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
        .with_detail("cycle_id", id.to_string())
}

fn row_to_cycle(row: PgRow) -> Result<CycleConfig, DomainError> {
    let start: chrono::DateTime<chrono::Utc> = row.get("start_date");
    let end: chrono::DateTime<chrono::Utc> = row.get("end_date");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let window = CycleWindow::new(Timestamp::from_datetime(start), Timestamp::from_datetime(end))?;

    Ok(CycleConfig::reconstitute(
        CycleId::from_raw(row.get("id")),
        row.get("name"),
        row.get("description"),
        window,
        row.get("done"),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
