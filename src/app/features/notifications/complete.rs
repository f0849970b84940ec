//! Merge stored notification settings with the surveys and projects the user
//! can currently see.

use crate::app::{config::EmptyMembershipPolicy, domain::NotificationSettings};

use super::types::Membership;

/// Build settings with an entry for every visible project and survey.
///
/// Weekly summaries keep their stored value, defaulting to `false`. Alerts are
/// on if the legacy `responseFinished` flag or the current `alert` entry is
/// `true`, otherwise `false`. `unsubscribedOrganizationIds` is carried over.
/// Entries for projects and surveys outside `memberships` are not included.
pub fn complete_notification_settings(
    settings: &NotificationSettings,
    memberships: &[Membership],
) -> NotificationSettings {
    let mut completed = NotificationSettings {
        unsubscribed_organization_ids: settings.unsubscribed_organization_ids.clone(),
        ..NotificationSettings::default()
    };

    for membership in memberships {
        for project in &membership.organization.projects {
            let weekly = settings.weekly_summary.get(&project.id).copied().unwrap_or(false);
            completed.weekly_summary.insert(project.id.clone(), weekly);

            for survey in project.surveys() {
                let alert = settings.legacy_response_finished(&survey.id)
                    || settings.alert.get(&survey.id).copied().unwrap_or(false);
                completed.alert.insert(survey.id.clone(), alert);
            }
        }
    }

    completed
}

/// Settings shown on the page. With no memberships, `policy` decides between
/// returning the stored settings untouched and merging against nothing.
pub fn resolve_notification_settings(
    stored: &NotificationSettings,
    memberships: &[Membership],
    policy: EmptyMembershipPolicy,
) -> NotificationSettings {
    if memberships.is_empty() && policy == EmptyMembershipPolicy::Keep {
        return stored.clone();
    }
    complete_notification_settings(stored, memberships)
}
