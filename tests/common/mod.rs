#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use surveyhub::app::{
    config::Config,
    db,
    domain::{
        EnvironmentId, EnvironmentType, OrganizationId, OrganizationRole, ProjectId, SurveyId,
        TeamId, UserId,
    },
    features::notifications::SqliteMembershipSource,
    AppState,
};
use surveyhub::create_router;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        memberships: Some(Arc::new(SqliteMembershipSource::new(pool.clone()))),
        db: pool,
        config: Config::for_tests(),
    }
}

pub fn test_router(pool: SqlitePool) -> axum::Router {
    create_router(test_state(pool))
}

pub async fn create_user(pool: &SqlitePool, notification_settings: Option<&str>) -> UserId {
    let user_id = UserId::new();
    let user = db::NewUser {
        id: user_id.clone(),
        email: format!("{}@example.com", user_id.as_str().to_lowercase()),
        notification_settings: notification_settings.map(str::to_string),
    };
    db::users::insert(pool, &user).await.unwrap();
    user_id
}

/// Create a 30-day session and return the cookie header value.
pub async fn session_cookie(pool: &SqlitePool, user_id: &UserId) -> String {
    let expires_at = OffsetDateTime::now_utc() + Duration::days(30);
    let session_id = db::sessions::create(pool, user_id, expires_at).await.unwrap();
    format!("session_id={}", session_id)
}

pub async fn create_org(pool: &SqlitePool, name: &str) -> OrganizationId {
    let id = OrganizationId::new();
    let org = db::organizations::NewOrganization {
        id: id.clone(),
        name: name.to_string(),
    };
    db::organizations::insert(pool, &org).await.unwrap();
    id
}

pub async fn add_member(pool: &SqlitePool, org: &OrganizationId, user: &UserId, role: OrganizationRole) {
    db::organizations::add_member(pool, org, user, role).await.unwrap();
}

pub async fn create_project(pool: &SqlitePool, org: &OrganizationId, name: &str) -> ProjectId {
    let id = ProjectId::new();
    let project = db::projects::NewProject {
        id: id.clone(),
        organization_id: org.clone(),
        name: name.to_string(),
    };
    db::projects::insert(pool, &project).await.unwrap();
    id
}

pub async fn create_environment(
    pool: &SqlitePool,
    project: &ProjectId,
    environment_type: EnvironmentType,
) -> EnvironmentId {
    let id = EnvironmentId::new();
    let environment = db::environments::NewEnvironment {
        id: id.clone(),
        project_id: project.clone(),
        environment_type,
    };
    db::environments::insert(pool, &environment).await.unwrap();
    id
}

pub async fn create_survey(pool: &SqlitePool, environment: &EnvironmentId, name: &str) -> SurveyId {
    let id = SurveyId::new();
    let survey = db::surveys::NewSurvey {
        id: id.clone(),
        environment_id: environment.clone(),
        name: name.to_string(),
    };
    db::surveys::insert(pool, &survey).await.unwrap();
    id
}

/// Create a team in `org` containing `user` with access to `project`.
pub async fn grant_team_access(
    pool: &SqlitePool,
    org: &OrganizationId,
    user: &UserId,
    project: &ProjectId,
) -> TeamId {
    let id = TeamId::new();
    let team = db::teams::NewTeam {
        id: id.clone(),
        organization_id: org.clone(),
        name: "Team".to_string(),
    };
    db::teams::insert(pool, &team).await.unwrap();
    db::teams::add_user(pool, &id, user).await.unwrap();
    db::teams::grant_project(pool, &id, project).await.unwrap();
    id
}

/// Ids of a one-organization, one-project, one-survey workspace.
pub struct Workspace {
    pub org: OrganizationId,
    pub project: ProjectId,
    pub environment: EnvironmentId,
    pub survey: SurveyId,
}

/// Organization with `user` as `role`, one project with a production
/// environment holding one survey.
pub async fn single_survey_workspace(pool: &SqlitePool, user: &UserId, role: OrganizationRole) -> Workspace {
    let org = create_org(pool, "Acme").await;
    add_member(pool, &org, user, role).await;
    let project = create_project(pool, &org, "Website").await;
    let environment = create_environment(pool, &project, EnvironmentType::Production).await;
    let survey = create_survey(pool, &environment, "Onboarding").await;
    Workspace {
        org,
        project,
        environment,
        survey,
    }
}

pub async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> (http::StatusCode, String) {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_settings_json(app: &axum::Router, cookie: &str) -> serde_json::Value {
    let (status, body) = get(app, "/api/environments/env1/notification-settings", Some(cookie)).await;
    assert_eq!(status, http::StatusCode::OK, "body: {}", body);
    serde_json::from_str(&body).unwrap()
}

pub fn update_form_body(notification_type: &str, element_id: &str, enabled: bool) -> String {
    format!(
        "notification_type={}&element_id={}&enabled={}",
        urlencoding::encode(notification_type),
        urlencoding::encode(element_id),
        enabled
    )
}

/// POST the toggle form. Returns status and `location` header.
pub async fn post_update(app: &axum::Router, cookie: &str, body: String) -> (http::StatusCode, Option<String>) {
    let request = http::Request::builder()
        .method("POST")
        .uri("/environments/env1/settings/notifications")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("cookie", cookie)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

pub async fn stored_settings(pool: &SqlitePool, user: &UserId) -> serde_json::Value {
    let user = db::users::find_by_id(pool, user).await.unwrap().expect("user exists");
    serde_json::from_str(user.notification_settings.as_deref().unwrap_or("null")).unwrap()
}
