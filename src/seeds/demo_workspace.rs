use std::env;

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};

use crate::app::db::{
    self,
    environments::NewEnvironment,
    organizations::NewOrganization,
    projects::NewProject,
    surveys::NewSurvey,
    teams::NewTeam,
    NewUser,
};
use crate::app::domain::{
    EnvironmentId, EnvironmentType, OrganizationId, OrganizationRole, ProjectId, SurveyId, TeamId,
    UserId,
};
use crate::seeds::{Seed, SeedOutcome};

/// A user with one owned organization and one organization reached through a
/// team, plus a session to browse the notifications page with.
pub struct DemoWorkspace;

async fn create_project(
    pool: &SqlitePool,
    organization_id: &OrganizationId,
    name: &str,
    production_surveys: &[&str],
) -> Result<(ProjectId, EnvironmentId), sqlx::Error> {
    let project_id = ProjectId::new();
    db::projects::insert(
        pool,
        &NewProject {
            id: project_id.clone(),
            organization_id: organization_id.clone(),
            name: name.to_string(),
        },
    )
    .await?;

    let production_id = EnvironmentId::new();
    for (id, environment_type) in [
        (production_id.clone(), EnvironmentType::Production),
        (EnvironmentId::new(), EnvironmentType::Development),
    ] {
        db::environments::insert(
            pool,
            &NewEnvironment {
                id,
                project_id: project_id.clone(),
                environment_type,
            },
        )
        .await?;
    }

    for survey in production_surveys {
        db::surveys::insert(
            pool,
            &NewSurvey {
                id: SurveyId::new(),
                environment_id: production_id.clone(),
                name: survey.to_string(),
            },
        )
        .await?;
    }

    Ok((project_id, production_id))
}

#[async_trait]
impl Seed for DemoWorkspace {
    fn version(&self) -> i64 {
        20260301120000
    }

    fn description(&self) -> &str {
        "demo_workspace"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        let email = match env::var("SEED_DEMO_EMAIL") {
            Ok(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => return Ok(SeedOutcome::Skipped),
        };

        let user_id = UserId::new();
        db::users::insert(
            pool,
            &NewUser {
                id: user_id.clone(),
                email: email.clone(),
                notification_settings: None,
            },
        )
        .await?;

        let own_org = OrganizationId::new();
        db::organizations::insert(
            pool,
            &NewOrganization {
                id: own_org.clone(),
                name: "Demo Org".to_string(),
            },
        )
        .await?;
        db::organizations::add_member(pool, &own_org, &user_id, OrganizationRole::Owner).await?;
        let (_, environment_id) =
            create_project(pool, &own_org, "Website", &["Onboarding", "Net Promoter Score"]).await?;
        create_project(pool, &own_org, "Mobile App", &["Feature request"]).await?;

        let shared_org = OrganizationId::new();
        db::organizations::insert(
            pool,
            &NewOrganization {
                id: shared_org.clone(),
                name: "Partner Org".to_string(),
            },
        )
        .await?;
        db::organizations::add_member(pool, &shared_org, &user_id, OrganizationRole::Member).await?;
        let (shared_project, _) = create_project(pool, &shared_org, "Checkout", &["Exit intent"]).await?;
        create_project(pool, &shared_org, "Internal", &["Staff pulse"]).await?;

        let team_id = TeamId::new();
        db::teams::insert(
            pool,
            &NewTeam {
                id: team_id.clone(),
                organization_id: shared_org.clone(),
                name: "Growth".to_string(),
            },
        )
        .await?;
        db::teams::add_user(pool, &team_id, &user_id).await?;
        db::teams::grant_project(pool, &team_id, &shared_project).await?;

        let session_id =
            db::sessions::create(pool, &user_id, OffsetDateTime::now_utc() + Duration::days(30)).await?;

        eprintln!(
            "Created demo user {}; cookie session_id={}; open /environments/{}/settings/notifications",
            email, session_id, environment_id
        );
        Ok(SeedOutcome::Applied)
    }
}
