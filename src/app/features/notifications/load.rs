//! Shared loading for the notifications page, its JSON twin and the update form.

use crate::app::{
    db,
    domain::{NotificationSettings, UserId},
    error::AppError,
    AppState,
};

use super::{complete::resolve_notification_settings, types::Membership};

/// Everything the notification editors need for one request.
pub struct NotificationsContext {
    pub user_id: UserId,
    /// Settings to display: stored settings merged with `memberships`.
    pub settings: NotificationSettings,
    pub memberships: Vec<Membership>,
}

/// Load the user behind `session_user_id`, their memberships and settings.
///
/// A missing user fails the request. Membership lookup problems do not: the
/// page renders with an empty membership list instead.
pub async fn load(state: &AppState, session_user_id: &str) -> Result<NotificationsContext, AppError> {
    let user_id = UserId::from_string(session_user_id)
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;

    let user = db::users::find_by_id(&state.db, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let memberships = fetch_memberships(state, &user_id).await;

    let stored = match NotificationSettings::from_stored(user.notification_settings.as_deref()) {
        Ok(s) => s,
        Err(err) => {
            tracing::warn!(%err, user_id = %user_id, "unreadable notification settings, using defaults");
            NotificationSettings::default()
        }
    };

    let settings = resolve_notification_settings(
        &stored,
        &memberships,
        state.config.empty_membership_policy,
    );

    Ok(NotificationsContext {
        user_id,
        settings,
        memberships,
    })
}

async fn fetch_memberships(state: &AppState, user_id: &UserId) -> Vec<Membership> {
    let Some(source) = state.memberships.as_ref() else {
        tracing::info!("membership lookup disabled, skipping");
        return Vec::new();
    };

    match source.fetch(user_id).await {
        Ok(memberships) => memberships,
        Err(err) => {
            tracing::error!(%err, user_id = %user_id, "failed to fetch memberships");
            Vec::new()
        }
    }
}
