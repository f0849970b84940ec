use std::collections::HashMap;
use std::sync::Arc;

use sqlx::{SqliteConnection, SqlitePool};

use crate::app::{
    config::Config,
    db,
    domain::{OrganizationRole, UserId},
};

use super::types::{
    Membership, MembershipEnvironment, MembershipOrganization, MembershipProject, MembershipSurvey,
};

/// Errors from loading a user's memberships.
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Unknown organization role: {0}")]
    UnknownRole(String),
}

/// Source of the organizations, projects and surveys a user may see.
#[async_trait::async_trait]
pub trait MembershipSource: Send + Sync {
    /// Non-billing memberships with their visible projects, production
    /// environments and surveys. Empty when the user belongs nowhere.
    async fn fetch(&self, user_id: &UserId) -> Result<Vec<Membership>, MembershipError>;
}

/// Reads memberships from the application database.
pub struct SqliteMembershipSource {
    pool: SqlitePool,
}

impl SqliteMembershipSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MembershipSource for SqliteMembershipSource {
    async fn fetch(&self, user_id: &UserId) -> Result<Vec<Membership>, MembershipError> {
        let mut tx = self.pool.begin().await?;
        let memberships = fetch_tree(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(memberships)
    }
}

/// Read the membership tree through one connection. Inside a transaction the
/// four levels come from the same snapshot.
pub async fn fetch_tree(
    conn: &mut SqliteConnection,
    user_id: &UserId,
) -> Result<Vec<Membership>, MembershipError> {
    let organizations = db::memberships::find_visible_organizations(&mut *conn, user_id).await?;
    if organizations.is_empty() {
        return Ok(Vec::new());
    }
    let projects = db::memberships::find_visible_projects(&mut *conn, user_id).await?;
    let environments = db::memberships::find_production_environments(&mut *conn, user_id).await?;
    let surveys = db::memberships::find_production_surveys(&mut *conn, user_id).await?;

    let mut surveys_by_environment: HashMap<String, Vec<MembershipSurvey>> = HashMap::new();
    for survey in surveys {
        surveys_by_environment
            .entry(survey.environment_id)
            .or_default()
            .push(MembershipSurvey {
                id: survey.id,
                name: survey.name,
            });
    }

    let mut environments_by_project: HashMap<String, Vec<MembershipEnvironment>> = HashMap::new();
    for environment in environments {
        let surveys = surveys_by_environment.remove(&environment.id).unwrap_or_default();
        environments_by_project
            .entry(environment.project_id)
            .or_default()
            .push(MembershipEnvironment {
                id: environment.id,
                surveys,
            });
    }

    let mut projects_by_organization: HashMap<String, Vec<MembershipProject>> = HashMap::new();
    for project in projects {
        let environments = environments_by_project.remove(&project.id).unwrap_or_default();
        projects_by_organization
            .entry(project.organization_id)
            .or_default()
            .push(MembershipProject {
                id: project.id,
                name: project.name,
                environments,
            });
    }

    organizations
        .into_iter()
        .map(|org| -> Result<Membership, MembershipError> {
            let role = org
                .role
                .parse::<OrganizationRole>()
                .map_err(|_| MembershipError::UnknownRole(org.role.clone()))?;
            let projects = projects_by_organization.remove(&org.id).unwrap_or_default();
            Ok(Membership {
                role,
                organization: MembershipOrganization {
                    id: org.id,
                    name: org.name,
                    projects,
                },
            })
        })
        .collect()
}

/// Build the membership source from config. `None` when lookups are disabled.
pub fn from_config(config: &Config, pool: &SqlitePool) -> Option<Arc<dyn MembershipSource>> {
    if config.membership_lookup_enabled {
        Some(Arc::new(SqliteMembershipSource::new(pool.clone())))
    } else {
        None
    }
}
