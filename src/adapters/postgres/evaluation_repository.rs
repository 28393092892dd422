//! PostgreSQL implementation of EvaluationRepository.
//!
//! Headers live in `evaluations`; payloads are stored as JSONB in
//! `evaluation_payloads`, one row per header.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};

use super::db_error;
use crate::domain::evaluation::{
    Evaluation, EvaluationKey, EvaluationPayload, EvaluationRecord, EvaluationStatus, SourceKind,
};
use crate::domain::foundation::{
    CycleId, DomainError, ErrorCode, EvaluationId, Timestamp, UserId,
};
use crate::domain::scoring::CompletionCounts;
use crate::ports::EvaluationRepository;

const RECORD_SELECT: &str = r#"
    SELECT e.id, e.evaluator_id, e.evaluatee_id, e.cycle_id, e.kind, e.status,
           e.created_at, p.body
    FROM evaluations e
    LEFT JOIN evaluation_payloads p ON p.evaluation_id = e.id
"#;

#[derive(Clone)]
pub struct PostgresEvaluationRepository {
    pool: PgPool,
}

impl PostgresEvaluationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_records(
        &self,
        filter: &str,
        binds: &[i64],
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        let sql = format!("{RECORD_SELECT} WHERE {filter} ORDER BY e.id");
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch evaluations"))?;

        rows.into_iter().map(row_to_record).collect()
    }
}

#[async_trait]
impl EvaluationRepository for PostgresEvaluationRepository {
    async fn find_by_key(&self, key: &EvaluationKey) -> Result<Option<EvaluationRecord>, DomainError> {
        let sql = format!(
            "{RECORD_SELECT} WHERE e.evaluator_id = $1 AND e.evaluatee_id = $2 \
             AND e.cycle_id = $3 AND e.kind = $4"
        );
        let row = sqlx::query(&sql)
            .bind(key.evaluator_id.as_i64())
            .bind(key.evaluatee_id.as_i64())
            .bind(key.cycle_id.as_i64())
            .bind(key.kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch evaluation"))?;

        row.map(row_to_record).transpose()
    }

    async fn open(&self, key: EvaluationKey, now: Timestamp) -> Result<EvaluationRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let record = lock_or_create(&mut tx, key, now).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(record)
    }

    async fn submit(
        &self,
        key: EvaluationKey,
        payload: EvaluationPayload,
        now: Timestamp,
    ) -> Result<EvaluationRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let mut record = lock_or_create(&mut tx, key, now).await?;
        record.attach(payload)?;

        let body = serde_json::to_value(&record.payload).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to encode payload: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO evaluation_payloads (evaluation_id, body, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (evaluation_id) DO UPDATE SET body = EXCLUDED.body, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.header.id.as_i64())
        .bind(body)
        .bind(now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to store payload"))?;

        sqlx::query("UPDATE evaluations SET status = $2 WHERE id = $1")
            .bind(record.header.id.as_i64())
            .bind(record.header.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update evaluation status"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(record)
    }

    async fn list_by_cycle(&self, cycle_id: CycleId) -> Result<Vec<EvaluationRecord>, DomainError> {
        self.fetch_records("e.cycle_id = $1", &[cycle_id.as_i64()]).await
    }

    async fn list_for_evaluatee(
        &self,
        evaluatee: UserId,
        cycle_id: Option<CycleId>,
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        match cycle_id {
            Some(cycle_id) => {
                self.fetch_records(
                    "e.evaluatee_id = $1 AND e.cycle_id = $2",
                    &[evaluatee.as_i64(), cycle_id.as_i64()],
                )
                .await
            }
            None => self.fetch_records("e.evaluatee_id = $1", &[evaluatee.as_i64()]).await,
        }
    }

    async fn list_for_evaluator(
        &self,
        evaluator: UserId,
        cycle_id: CycleId,
    ) -> Result<Vec<EvaluationRecord>, DomainError> {
        self.fetch_records(
            "e.evaluator_id = $1 AND e.cycle_id = $2",
            &[evaluator.as_i64(), cycle_id.as_i64()],
        )
        .await
    }

    async fn overall_completion(&self) -> Result<CompletionCounts, DomainError> {
        let (total, completed): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'completed') FROM evaluations",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count evaluations"))?;

        Ok(CompletionCounts::from_totals(total.max(0) as usize, completed.max(0) as usize))
    }

    async fn latest_cycle_with_evaluations(&self) -> Result<Option<CycleId>, DomainError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT cycle_id FROM evaluations ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch latest evaluation"))?;

        Ok(row.map(|(id,)| CycleId::from_raw(id)))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

/// Finds or creates the header for `key` and locks it for the rest of the transaction.
async fn lock_or_create(
    tx: &mut Transaction<'_, Postgres>,
    key: EvaluationKey,
    now: Timestamp,
) -> Result<EvaluationRecord, DomainError> {
    // The no-op update makes RETURNING yield the existing row and takes its lock.
    let row = sqlx::query(
        r#"
        INSERT INTO evaluations (evaluator_id, evaluatee_id, cycle_id, kind, status, created_at)
        VALUES ($1, $2, $3, $4, 'pending', $5)
        ON CONFLICT (evaluator_id, evaluatee_id, cycle_id, kind)
        DO UPDATE SET kind = EXCLUDED.kind
        RETURNING id, status, created_at
        "#,
    )
    .bind(key.evaluator_id.as_i64())
    .bind(key.evaluatee_id.as_i64())
    .bind(key.cycle_id.as_i64())
    .bind(key.kind.as_str())
    .bind(now.as_datetime())
    .fetch_one(&mut **tx)
    .await
    .map_err(db_error("Failed to open evaluation"))?;

    let id = EvaluationId::from_raw(row.get("id"));
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let body: Option<serde_json::Value> =
        sqlx::query_scalar("SELECT body FROM evaluation_payloads WHERE evaluation_id = $1")
            .bind(id.as_i64())
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error("Failed to load payload"))?;

    Ok(EvaluationRecord {
        header: Evaluation {
            id,
            key,
            status: str_to_status(&status)?,
            created_at: Timestamp::from_datetime(created_at),
        },
        payload: body.map(decode_payload).transpose()?.flatten(),
    })
}

fn row_to_record(row: PgRow) -> Result<EvaluationRecord, DomainError> {
    let kind: String = row.get("kind");
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let body: Option<serde_json::Value> = row.get("body");

    let key = EvaluationKey {
        evaluator_id: UserId::from_raw(row.get("evaluator_id")),
        evaluatee_id: UserId::from_raw(row.get("evaluatee_id")),
        cycle_id: CycleId::from_raw(row.get("cycle_id")),
        kind: kind.parse::<SourceKind>()?,
    };

    Ok(EvaluationRecord {
        header: Evaluation {
            id: EvaluationId::from_raw(row.get("id")),
            key,
            status: str_to_status(&status)?,
            created_at: Timestamp::from_datetime(created_at),
        },
        payload: body.map(decode_payload).transpose()?.flatten(),
    })
}

fn decode_payload(body: serde_json::Value) -> Result<Option<EvaluationPayload>, DomainError> {
    serde_json::from_value(body).map_err(|e| {
        DomainError::new(ErrorCode::InternalError, format!("Failed to decode payload: {}", e))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Type Conversions
// ════════════════════════════════════════════════════════════════════════════════

fn str_to_status(s: &str) -> Result<EvaluationStatus, DomainError> {
    match s {
        "pending" => Ok(EvaluationStatus::Pending),
        "completed" => Ok(EvaluationStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Invalid evaluation status: {}", s),
        )),
    }
}
