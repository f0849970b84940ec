use sqlx::SqliteExecutor;
use time::OffsetDateTime;

use crate::app::domain::{OrganizationId, ProjectId, TeamId, UserId};

/// Data structure for inserting a new team.
pub struct NewTeam {
    pub id: TeamId,
    pub organization_id: OrganizationId,
    pub name: String,
}

/// Insert a new team into the database.
pub async fn insert<'e, E>(executor: E, team: &NewTeam) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO teams (id, organization_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(team.id.as_str())
        .bind(team.organization_id.as_str())
        .bind(&team.name)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Add a user to a team. Idempotent: no-op if already a member (INSERT OR IGNORE).
pub async fn add_user<'e, E>(executor: E, team_id: &TeamId, user_id: &UserId) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT OR IGNORE INTO team_users (team_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(team_id.as_str())
        .bind(user_id.as_str())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Grant a team access to a project. Idempotent.
pub async fn grant_project<'e, E>(
    executor: E,
    team_id: &TeamId,
    project_id: &ProjectId,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT OR IGNORE INTO project_teams (project_id, team_id, created_at) VALUES (?, ?, ?)")
        .bind(project_id.as_str())
        .bind(team_id.as_str())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}
