use sqlx::SqliteExecutor;
use time::OffsetDateTime;

use crate::app::domain::{EnvironmentId, EnvironmentType, ProjectId};

/// Data structure for inserting a new environment.
pub struct NewEnvironment {
    pub id: EnvironmentId,
    pub project_id: ProjectId,
    pub environment_type: EnvironmentType,
}

/// Insert a new environment into the database.
pub async fn insert<'e, E>(executor: E, environment: &NewEnvironment) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO environments (id, project_id, type, created_at) VALUES (?, ?, ?, ?)")
        .bind(environment.id.as_str())
        .bind(environment.project_id.as_str())
        .bind(environment.environment_type.to_string())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}
