//! Access-scoped reads behind the notification settings page.
//!
//! A project is visible when the user holds a non-billing membership in its
//! organization and either that membership is `owner`/`manager`, or one of the
//! user's teams has been granted the project. Every query here binds the user
//! id twice: once for the membership, once for the team check.

use sqlx::{FromRow, SqliteExecutor};

use crate::app::domain::UserId;

/// Ids of projects visible to the user. Two `?` binds, both the user id.
macro_rules! visible_project_ids {
    () => {
        "SELECT p.id FROM projects p \
         JOIN memberships m ON m.organization_id = p.organization_id \
         WHERE m.user_id = ? AND m.role <> 'billing' \
         AND (m.role IN ('owner', 'manager') OR EXISTS ( \
             SELECT 1 FROM project_teams pt \
             JOIN team_users tu ON tu.team_id = pt.team_id \
             WHERE pt.project_id = p.id AND tu.user_id = ?))"
    };
}

/// Organization the user belongs to, with their role there.
#[derive(Debug, FromRow)]
pub struct VisibleOrganization {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, FromRow)]
pub struct VisibleProject {
    pub id: String,
    pub name: String,
    pub organization_id: String,
}

#[derive(Debug, FromRow)]
pub struct ProductionEnvironment {
    pub id: String,
    pub project_id: String,
}

#[derive(Debug, FromRow)]
pub struct ProductionSurvey {
    pub id: String,
    pub name: String,
    pub environment_id: String,
}

/// Organizations where the user is owner/manager, or reaches at least one
/// project through a team. Billing memberships never match.
pub async fn find_visible_organizations<'e, E>(
    executor: E,
    user_id: &UserId,
) -> Result<Vec<VisibleOrganization>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, VisibleOrganization>(
        "SELECT o.id, o.name, m.role FROM memberships m \
         JOIN organizations o ON o.id = m.organization_id \
         WHERE m.user_id = ? AND m.role <> 'billing' \
         AND (m.role IN ('owner', 'manager') OR EXISTS ( \
             SELECT 1 FROM projects p \
             JOIN project_teams pt ON pt.project_id = p.id \
             JOIN team_users tu ON tu.team_id = pt.team_id \
             WHERE p.organization_id = o.id AND tu.user_id = ?)) \
         ORDER BY o.created_at, o.id",
    )
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(executor)
    .await
}

/// All projects visible to the user, across organizations.
pub async fn find_visible_projects<'e, E>(
    executor: E,
    user_id: &UserId,
) -> Result<Vec<VisibleProject>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, VisibleProject>(concat!(
        "SELECT id, name, organization_id FROM projects WHERE id IN (",
        visible_project_ids!(),
        ") ORDER BY created_at, id"
    ))
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(executor)
    .await
}

/// Production environments of visible projects.
pub async fn find_production_environments<'e, E>(
    executor: E,
    user_id: &UserId,
) -> Result<Vec<ProductionEnvironment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, ProductionEnvironment>(concat!(
        "SELECT id, project_id FROM environments \
         WHERE type = 'production' AND project_id IN (",
        visible_project_ids!(),
        ") ORDER BY created_at, id"
    ))
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(executor)
    .await
}

/// Surveys (id and name only) under production environments of visible projects.
pub async fn find_production_surveys<'e, E>(
    executor: E,
    user_id: &UserId,
) -> Result<Vec<ProductionSurvey>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, ProductionSurvey>(concat!(
        "SELECT s.id, s.name, s.environment_id FROM surveys s \
         JOIN environments e ON e.id = s.environment_id \
         WHERE e.type = 'production' AND e.project_id IN (",
        visible_project_ids!(),
        ") ORDER BY s.created_at, s.id"
    ))
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(executor)
    .await
}
