use sqlx::SqliteExecutor;
use time::OffsetDateTime;

use crate::app::domain::{OrganizationId, ProjectId};

/// Data structure for inserting a new project.
pub struct NewProject {
    pub id: ProjectId,
    pub organization_id: OrganizationId,
    pub name: String,
}

/// Insert a new project into the database.
pub async fn insert<'e, E>(executor: E, project: &NewProject) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO projects (id, organization_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(project.id.as_str())
        .bind(project.organization_id.as_str())
        .bind(&project.name)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}
