//! PostgreSQL implementation of RubricRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::db_error;
use crate::domain::foundation::{
    CriterionId, CycleId, DomainError, PillarId, TrackId, Weight,
};
use crate::domain::rubric::{
    Criterion, CycleRubricRow, Pillar, RubricLine, Track, TrackCriterionWeight,
};
use crate::ports::RubricRepository;

/// PostgreSQL implementation of RubricRepository.
#[derive(Clone)]
pub struct PostgresRubricRepository {
    pool: PgPool,
}

impl PostgresRubricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LINE_COLUMNS: &str = r#"
    t.id AS track_id, t.name AS track_name,
    p.id AS pillar_id, p.name AS pillar_name,
    c.id AS criterion_id, c.name AS criterion_name,
    r.weight, r.is_active
"#;

#[async_trait]
impl RubricRepository for PostgresRubricRepository {
    async fn find_track(&self, id: TrackId) -> Result<Option<Track>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM tracks WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch track"))?;

        Ok(row.map(|row| Track {
            id: TrackId::from_raw(row.get("id")),
            name: row.get("name"),
        }))
    }

    async fn find_pillar(&self, id: PillarId) -> Result<Option<Pillar>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM pillars WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch pillar"))?;

        Ok(row.map(|row| Pillar {
            id: PillarId::from_raw(row.get("id")),
            name: row.get("name"),
        }))
    }

    async fn find_criterion(&self, id: CriterionId) -> Result<Option<Criterion>, DomainError> {
        let row = sqlx::query("SELECT id, pillar_id, name, description FROM criteria WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch criterion"))?;

        Ok(row.map(row_to_criterion))
    }

    async fn criteria_of_pillar(&self, id: PillarId) -> Result<Vec<Criterion>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, pillar_id, name, description FROM criteria WHERE pillar_id = $1 ORDER BY name",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch criteria"))?;

        Ok(rows.into_iter().map(row_to_criterion).collect())
    }

    async fn upsert_draft(&self, rows: &[TrackCriterionWeight]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO track_criterion_weights (track_id, criterion_id, weight, is_active)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (track_id, criterion_id)
                DO UPDATE SET weight = EXCLUDED.weight, is_active = EXCLUDED.is_active
                "#,
            )
            .bind(row.track_id.as_i64())
            .bind(row.criterion_id.as_i64())
            .bind(row.weight.value())
            .bind(row.is_active)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to upsert draft row"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(())
    }

    async fn delete_draft(&self, track_id: TrackId, criterion_id: CriterionId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM track_criterion_weights WHERE track_id = $1 AND criterion_id = $2",
        )
        .bind(track_id.as_i64())
        .bind(criterion_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to delete draft row"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_draft(&self, track_id: Option<TrackId>) -> Result<Vec<TrackCriterionWeight>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT track_id, criterion_id, weight, is_active
            FROM track_criterion_weights
            WHERE $1::BIGINT IS NULL OR track_id = $1
            ORDER BY track_id, criterion_id
            "#,
        )
        .bind(track_id.map(|t| t.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list draft rows"))?;

        rows.into_iter()
            .map(|row| -> Result<_, DomainError> {
                Ok(TrackCriterionWeight::new(
                    TrackId::from_raw(row.get("track_id")),
                    CriterionId::from_raw(row.get("criterion_id")),
                    Weight::try_new(row.get("weight"))?,
                    row.get("is_active"),
                ))
            })
            .collect()
    }

    async fn draft_lines(&self, track_id: Option<TrackId>) -> Result<Vec<RubricLine>, DomainError> {
        let sql = format!(
            r#"
            SELECT {LINE_COLUMNS}
            FROM track_criterion_weights r
            JOIN tracks t ON t.id = r.track_id
            JOIN criteria c ON c.id = r.criterion_id
            JOIN pillars p ON p.id = c.pillar_id
            WHERE $1::BIGINT IS NULL OR r.track_id = $1
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(track_id.map(|t| t.as_i64()))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load draft rubric"))?;

        rows.into_iter().map(row_to_line).collect()
    }

    async fn snapshot_lines(&self, cycle_id: CycleId) -> Result<Vec<RubricLine>, DomainError> {
        let sql = format!(
            r#"
            SELECT {LINE_COLUMNS}
            FROM cycle_rubric_rows r
            JOIN tracks t ON t.id = r.track_id
            JOIN criteria c ON c.id = r.criterion_id
            JOIN pillars p ON p.id = c.pillar_id
            WHERE r.cycle_id = $1
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(cycle_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load cycle rubric"))?;

        rows.into_iter().map(row_to_line).collect()
    }

    async fn snapshot_rows(&self, cycle_id: CycleId) -> Result<Vec<CycleRubricRow>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT cycle_id, track_id, criterion_id, weight, is_active
            FROM cycle_rubric_rows
            WHERE cycle_id = $1
            ORDER BY track_id, criterion_id
            "#,
        )
        .bind(cycle_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list cycle rubric rows"))?;

        rows.into_iter()
            .map(|row| -> Result<_, DomainError> {
                Ok(CycleRubricRow {
                    cycle_id: CycleId::from_raw(row.get("cycle_id")),
                    track_id: TrackId::from_raw(row.get("track_id")),
                    criterion_id: CriterionId::from_raw(row.get("criterion_id")),
                    weight: Weight::try_new(row.get("weight"))?,
                    is_active: row.get("is_active"),
                })
            })
            .collect()
    }

    async fn update_snapshot_row(&self, row: &CycleRubricRow) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE cycle_rubric_rows SET weight = $4, is_active = $5
            WHERE cycle_id = $1 AND track_id = $2 AND criterion_id = $3
            "#,
        )
        .bind(row.cycle_id.as_i64())
        .bind(row.track_id.as_i64())
        .bind(row.criterion_id.as_i64())
        .bind(row.weight.value())
        .bind(row.is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update cycle rubric row"))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Row Mapping
// ════════════════════════════════════════════════════════════════════════════════

fn row_to_criterion(row: PgRow) -> Criterion {
    Criterion {
        id: CriterionId::from_raw(row.get("id")),
        pillar_id: PillarId::from_raw(row.get("pillar_id")),
        name: row.get("name"),
        description: row.get("description"),
    }
}

fn row_to_line(row: PgRow) -> Result<RubricLine, DomainError> {
    Ok(RubricLine {
        track: Track {
            id: TrackId::from_raw(row.get("track_id")),
            name: row.get("track_name"),
        },
        pillar: Pillar {
            id: PillarId::from_raw(row.get("pillar_id")),
            name: row.get("pillar_name"),
        },
        criterion_id: CriterionId::from_raw(row.get("criterion_id")),
        criterion_name: row.get("criterion_name"),
        weight: Weight::try_new(row.get("weight"))?,
        is_active: row.get("is_active"),
    })
}
