//! POST /environments/:environment_id/settings/notifications — flip one notification toggle.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    db,
    domain::{NotificationSettings, NotificationType, UserId},
    error::AppError,
    session::AuthenticatedSession,
    AppState,
};

use super::{
    complete::complete_notification_settings,
    load,
    types::{self, Membership},
};

/// Toggle form data from HTTP request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationForm {
    #[validate(length(min = 1))]
    pub notification_type: String,

    #[validate(length(min = 1, max = 64))]
    pub element_id: String,

    /// For organizations: subscribed to new surveys.
    pub enabled: bool,
}

/// Result of writing one toggle.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Stored JSON could not be parsed; nothing was written.
    UnreadableSettings,
}

/// Apply one toggle to the user's stored settings.
///
/// The row is re-read inside the transaction that writes it, so concurrent
/// toggles build on each other instead of overwriting. Visible entries from
/// `memberships` are folded in before the toggle; everything else stored on
/// the record is kept.
pub async fn save_toggle(
    state: &AppState,
    user_id: &UserId,
    memberships: &[Membership],
    kind: NotificationType,
    element_id: &str,
    enabled: bool,
) -> Result<SaveOutcome, AppError> {
    let mut tx = state.db.begin().await?;

    if !db::users::touch(&mut *tx, user_id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    let user = db::users::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut next = match NotificationSettings::from_stored(user.notification_settings.as_deref()) {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(%err, user_id = %user_id, "refusing to overwrite unreadable notification settings");
            return Ok(SaveOutcome::UnreadableSettings);
        }
    };
    let completed = complete_notification_settings(&next, memberships);
    next.absorb(&completed);
    next.set(kind, element_id, enabled);

    let json = next.to_json().map_err(|_| AppError::Internal)?;
    db::users::update_notification_settings(&mut *tx, user_id, &json).await?;
    tx.commit().await?;

    Ok(SaveOutcome::Saved)
}

fn settings_path(environment_id: &str) -> String {
    format!(
        "/environments/{}/settings/notifications",
        urlencoding::encode(environment_id)
    )
}

fn error_redirect(environment_id: &str, msg: &str) -> Redirect {
    Redirect::to(&format!(
        "{}?error={}",
        settings_path(environment_id),
        urlencoding::encode(msg)
    ))
}

/// Validation first (no DB), then check the element is visible to the user,
/// then write the toggle.
pub async fn update(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
    Path(environment_id): Path<String>,
    Form(form): Form<UpdateNotificationForm>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        return Ok(error_redirect(&environment_id, "Invalid notification setting.").into_response());
    }
    let kind = match form.notification_type.parse::<NotificationType>() {
        Ok(k) => k,
        Err(_) => {
            return Ok(error_redirect(&environment_id, "Unknown notification type.").into_response())
        }
    };

    let context = load::load(&state, &session.user_id).await?;

    let visible = match kind {
        NotificationType::Alert => types::contains_survey(&context.memberships, &form.element_id),
        NotificationType::WeeklySummary => {
            types::contains_project(&context.memberships, &form.element_id)
        }
        NotificationType::UnsubscribedOrganizationIds => {
            types::contains_organization(&context.memberships, &form.element_id)
        }
    };
    if !visible {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let outcome = save_toggle(
        &state,
        &context.user_id,
        &context.memberships,
        kind,
        &form.element_id,
        form.enabled,
    )
    .await?;
    if outcome == SaveOutcome::UnreadableSettings {
        return Ok(error_redirect(
            &environment_id,
            "Your saved notification settings could not be read.",
        )
        .into_response());
    }

    tracing::info!(
        user_id = %context.user_id,
        notification_type = %kind,
        element_id = %form.element_id,
        enabled = form.enabled,
        "notification setting updated"
    );

    Ok(Redirect::to(&format!(
        "{}?success=notification_updated",
        settings_path(&environment_id)
    ))
    .into_response())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/environments/:environment_id/settings/notifications", post(update))
}
