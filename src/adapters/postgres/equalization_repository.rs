//! PostgreSQL implementation of EqualizationRepository.
//!
//! Inserts run in a SERIALIZABLE transaction; the unique index on
//! `equalizations.evaluation_id` turns a concurrent duplicate into a
//! unique violation, reported as `EqualizationExists`.
//!
//! Edits are compare-and-set on `revision` and write their history row in
//! the same transaction.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::{db_error, is_unique_violation};
use crate::domain::equalization::{Equalization, EqualizationAmendment, EqualizationInput};
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{
    CycleId, DomainError, EqualizationId, ErrorCode, EvaluationId, FinalScore, Timestamp, UserId,
};
use crate::ports::EqualizationRepository;

#[derive(Clone)]
pub struct PostgresEqualizationRepository {
    pool: PgPool,
}

impl PostgresEqualizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EQUALIZATION_COLUMNS: &str = "id, evaluation_id, cycle_id, collaborator_id, score, \
     justification, revision, created_at, updated_at";

#[async_trait]
impl EqualizationRepository for PostgresEqualizationRepository {
    async fn insert(
        &self,
        evaluation: &Evaluation,
        input: EqualizationInput,
        now: Timestamp,
    ) -> Result<Equalization, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to set isolation level"))?;

        let row = sqlx::query(
            r#"
            INSERT INTO equalizations (
                evaluation_id, cycle_id, collaborator_id, score, justification,
                revision, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, 0, $6, $6)
            RETURNING id
            "#,
        )
        .bind(evaluation.id.as_i64())
        .bind(evaluation.cycle_id().as_i64())
        .bind(evaluation.evaluatee_id().as_i64())
        .bind(input.score.value())
        .bind(&input.justification)
        .bind(now.as_datetime())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::EqualizationExists,
                    "An equalization already exists for this evaluation",
                )
                .with_detail("evaluation_id", evaluation.id.to_string())
            } else {
                DomainError::database("Failed to insert equalization", e)
            }
        })?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(Equalization {
            id: EqualizationId::from_raw(row.get("id")),
            evaluation_id: evaluation.id,
            cycle_id: evaluation.cycle_id(),
            collaborator_id: evaluation.evaluatee_id(),
            score: input.score,
            justification: input.justification,
            revision: 0,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_evaluation(&self, evaluation_id: EvaluationId) -> Result<Option<Equalization>, DomainError> {
        let sql = format!("SELECT {EQUALIZATION_COLUMNS} FROM equalizations WHERE evaluation_id = $1");
        let row = sqlx::query(&sql)
            .bind(evaluation_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch equalization"))?;

        row.map(row_to_equalization).transpose()
    }

    async fn amend(
        &self,
        equalization: &Equalization,
        amendment: &EqualizationAmendment,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE equalizations SET
                score = $2,
                justification = $3,
                revision = revision + 1,
                updated_at = $4
            WHERE id = $1 AND revision = $5
            "#,
        )
        .bind(equalization.id.as_i64())
        .bind(equalization.score.value())
        .bind(&equalization.justification)
        .bind(equalization.updated_at.as_datetime())
        .bind(amendment.revision as i32 - 1)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to update equalization"))?;

        if result.rows_affected() == 0 {
            let stored: Option<i32> = sqlx::query_scalar("SELECT revision FROM equalizations WHERE id = $1")
                .bind(equalization.id.as_i64())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to fetch equalization revision"))?;
            return Err(match stored {
                Some(revision) => DomainError::new(
                    ErrorCode::EqualizationStale,
                    format!("Equalization {} was changed by another edit", equalization.id),
                )
                .with_detail("stored_revision", revision.to_string()),
                None => DomainError::new(
                    ErrorCode::EqualizationNotFound,
                    format!("Equalization not found: {}", equalization.id),
                ),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO equalization_history (
                equalization_id, revision, previous_score, new_score,
                change_reason, changed_by, changed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(amendment.equalization_id.as_i64())
        .bind(amendment.revision as i32)
        .bind(amendment.previous_score.value())
        .bind(amendment.new_score.value())
        .bind(&amendment.change_reason)
        .bind(amendment.changed_by.map(|id| id.as_i64()))
        .bind(amendment.changed_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to record equalization history"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn history(&self, equalization_id: EqualizationId) -> Result<Vec<EqualizationAmendment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT equalization_id, revision, previous_score, new_score,
                   change_reason, changed_by, changed_at
            FROM equalization_history
            WHERE equalization_id = $1
            ORDER BY revision DESC
            "#,
        )
        .bind(equalization_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list equalization history"))?;

        rows.into_iter().map(row_to_amendment).collect()
    }

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<Equalization>, DomainError> {
        let sql = format!(
            "SELECT {EQUALIZATION_COLUMNS} FROM equalizations WHERE cycle_id = $1 ORDER BY id"
        );
        let rows = sqlx::query(&sql)
            .bind(cycle_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list equalizations"))?;

        rows.into_iter().map(row_to_equalization).collect()
    }
}

fn row_to_equalization(row: PgRow) -> Result<Equalization, DomainError> {
    let revision: i32 = row.get("revision");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    Ok(Equalization {
        id: EqualizationId::from_raw(row.get("id")),
        evaluation_id: EvaluationId::from_raw(row.get("evaluation_id")),
        cycle_id: CycleId::from_raw(row.get("cycle_id")),
        collaborator_id: UserId::from_raw(row.get("collaborator_id")),
        score: FinalScore::try_new(row.get("score"))?,
        justification: row.get("justification"),
        revision: revision.max(0) as u32,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn row_to_amendment(row: PgRow) -> Result<EqualizationAmendment, DomainError> {
    let revision: i32 = row.get("revision");
    let changed_by: Option<i64> = row.get("changed_by");
    let changed_at: chrono::DateTime<chrono::Utc> = row.get("changed_at");

    Ok(EqualizationAmendment {
        equalization_id: EqualizationId::from_raw(row.get("equalization_id")),
        revision: revision.max(1) as u32,
        previous_score: FinalScore::try_new(row.get("previous_score"))?,
        new_score: FinalScore::try_new(row.get("new_score"))?,
        change_reason: row.get("change_reason"),
        changed_by: changed_by.map(UserId::from_raw),
        changed_at: Timestamp::from_datetime(changed_at),
    })
}
