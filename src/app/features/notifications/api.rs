//! GET /api/environments/:environment_id/notification-settings — completed settings and memberships as JSON.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::app::{
    domain::NotificationSettings,
    error::AppError,
    session::AuthenticatedSession,
    AppState,
};

use super::{
    deep_link::{AutoDisable, NotificationsQuery},
    load,
    types::Membership,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsResponse {
    pub environment_id: String,
    pub notification_settings: NotificationSettings,
    pub memberships: Vec<Membership>,
    pub auto_disable: AutoDisable,
}

pub async fn get_notification_settings(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
    Path(environment_id): Path<String>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<NotificationSettingsResponse>, AppError> {
    let context = load::load(&state, &session.user_id).await?;

    Ok(Json(NotificationSettingsResponse {
        environment_id,
        notification_settings: context.settings,
        memberships: context.memberships,
        auto_disable: AutoDisable::from_query(&query),
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/environments/:environment_id/notification-settings",
        get(get_notification_settings),
    )
}
