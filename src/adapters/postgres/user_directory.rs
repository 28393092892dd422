//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, TrackId, UserId};
use crate::domain::people::{Role, UserProfile};
use crate::domain::rubric::Track;
use crate::ports::UserDirectory;

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_SELECT: &str = r#"
    SELECT u.id, u.name, u.email, u.position, pr.name AS current_project,
           t.id AS track_id, t.name AS track_name,
           COALESCE(
               (SELECT array_agg(r.role ORDER BY r.role)
                FROM user_roles r
                WHERE r.user_id = u.id AND r.is_active),
               ARRAY[]::TEXT[]
           ) AS roles
    FROM users u
    LEFT JOIN tracks t ON t.id = u.track_id
    LEFT JOIN projects pr ON pr.id = u.project_id
"#;

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find(&self, id: UserId) -> Result<Option<UserProfile>, DomainError> {
        let sql = format!("{PROFILE_SELECT} WHERE u.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch user"))?;

        Ok(row.map(row_to_profile))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        let sql = format!("{PROFILE_SELECT} WHERE u.id = ANY($1) ORDER BY u.name");
        let rows = sqlx::query(&sql)
            .bind(raw)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch users"))?;

        Ok(rows.into_iter().map(row_to_profile).collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError> {
        let sql = format!(
            r#"{PROFILE_SELECT}
            WHERE EXISTS (
                SELECT 1 FROM user_roles r
                WHERE r.user_id = u.id AND r.role = $1 AND r.is_active
            )
            ORDER BY u.name"#
        );
        let rows = sqlx::query(&sql)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users by role"))?;

        Ok(rows.into_iter().map(row_to_profile).collect())
    }
}

/// Unknown role strings are dropped.
fn row_to_profile(row: PgRow) -> UserProfile {
    let track_id: Option<i64> = row.get("track_id");
    let track_name: Option<String> = row.get("track_name");
    let roles: Vec<String> = row.get("roles");

    UserProfile {
        id: UserId::from_raw(row.get("id")),
        name: row.get("name"),
        email: row.get("email"),
        position: row.get("position"),
        track: track_id.zip(track_name).map(|(id, name)| Track {
            id: TrackId::from_raw(id),
            name,
        }),
        current_project: row.get("current_project"),
        roles: roles.iter().filter_map(|r| r.parse::<Role>().ok()).collect(),
    }
}
