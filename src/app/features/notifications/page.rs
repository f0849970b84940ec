//! GET /environments/:environment_id/settings/notifications — account notification settings page.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::app::{
    domain::{NotificationSettings, NotificationType},
    error::AppError,
    session::AuthenticatedSession,
    AppState, APP_NAME,
};

use super::{
    deep_link::{AutoDisable, NotificationsQuery},
    load,
    types::Membership,
};

/// One switch on the page.
pub struct ToggleRow {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub highlighted: bool,
}

pub struct AlertProjectView {
    pub name: String,
    pub surveys: Vec<ToggleRow>,
}

/// Alert editor section for one organization. `subscription` is the
/// auto-subscribe switch for new surveys.
pub struct AlertOrganizationView {
    pub name: String,
    /// Whether every project is listed or only those shared with the user's teams.
    pub all_projects: bool,
    pub subscription: ToggleRow,
    pub projects: Vec<AlertProjectView>,
}

pub struct WeeklySummaryOrganizationView {
    pub name: String,
    pub projects: Vec<ToggleRow>,
}

#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate {
    pub app_name: &'static str,
    pub environment_id: String,
    pub alert_organizations: Vec<AlertOrganizationView>,
    pub weekly_summary_organizations: Vec<WeeklySummaryOrganizationView>,
    pub error: String,
    pub success: String,
}

fn alert_organizations(
    memberships: &[Membership],
    settings: &NotificationSettings,
    auto: &AutoDisable,
) -> Vec<AlertOrganizationView> {
    memberships
        .iter()
        .map(|m| {
            let org = &m.organization;
            AlertOrganizationView {
                name: org.name.clone(),
                all_projects: m.role.sees_all_projects(),
                subscription: ToggleRow {
                    id: org.id.clone(),
                    name: org.name.clone(),
                    enabled: settings.is_subscribed_to_organization(&org.id),
                    highlighted: auto.targets(NotificationType::UnsubscribedOrganizationIds, &org.id),
                },
                projects: org
                    .projects
                    .iter()
                    .map(|p| AlertProjectView {
                        name: p.name.clone(),
                        surveys: p
                            .surveys()
                            .map(|s| ToggleRow {
                                id: s.id.clone(),
                                name: s.name.clone(),
                                enabled: settings.alert.get(&s.id).copied().unwrap_or(false),
                                highlighted: auto.targets(NotificationType::Alert, &s.id),
                            })
                            .collect(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn weekly_summary_organizations(
    memberships: &[Membership],
    settings: &NotificationSettings,
    auto: &AutoDisable,
) -> Vec<WeeklySummaryOrganizationView> {
    memberships
        .iter()
        .map(|m| WeeklySummaryOrganizationView {
            name: m.organization.name.clone(),
            projects: m
                .organization
                .projects
                .iter()
                .map(|p| ToggleRow {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    enabled: settings.weekly_summary.get(&p.id).copied().unwrap_or(false),
                    highlighted: auto.targets(NotificationType::WeeklySummary, &p.id),
                })
                .collect(),
        })
        .collect()
}

/// GET /environments/:environment_id/settings/notifications
pub async fn show(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
    Path(environment_id): Path<String>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Response, AppError> {
    let context = load::load(&state, &session.user_id).await?;
    let auto = AutoDisable::from_query(&query);

    let template = NotificationsTemplate {
        app_name: APP_NAME,
        environment_id,
        alert_organizations: alert_organizations(&context.memberships, &context.settings, &auto),
        weekly_summary_organizations: weekly_summary_organizations(
            &context.memberships,
            &context.settings,
            &auto,
        ),
        error: query.error.unwrap_or_default(),
        success: query.success.unwrap_or_default(),
    };

    Ok(Html(template.render().unwrap_or_else(|_| "Template error".to_string())).into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/environments/:environment_id/settings/notifications", get(show))
}
