use serde::{Deserialize, Serialize};

use crate::app::domain::NotificationType;

/// Query string of the notifications page. `type` and `elementId` come from
/// links in notification emails and point at one toggle.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationsQuery {
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    #[serde(rename = "elementId")]
    pub element_id: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// The toggle a deep link points at, passed through to the editors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDisable {
    pub notification_type: Option<NotificationType>,
    pub element_id: Option<String>,
}

impl AutoDisable {
    /// Unknown notification types are dropped rather than rejected.
    pub fn from_query(query: &NotificationsQuery) -> Self {
        Self {
            notification_type: query
                .notification_type
                .as_deref()
                .and_then(|t| t.parse::<NotificationType>().ok()),
            element_id: query.element_id.clone().filter(|id| !id.is_empty()),
        }
    }

    pub fn targets(&self, kind: NotificationType, element_id: &str) -> bool {
        self.notification_type == Some(kind) && self.element_id.as_deref() == Some(element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_matching_type_and_element() {
        let query = NotificationsQuery {
            notification_type: Some("alert".to_string()),
            element_id: Some("s1".to_string()),
            ..Default::default()
        };
        let auto = AutoDisable::from_query(&query);
        assert!(auto.targets(NotificationType::Alert, "s1"));
        assert!(!auto.targets(NotificationType::WeeklySummary, "s1"));
        assert!(!auto.targets(NotificationType::Alert, "s2"));
    }

    #[test]
    fn unknown_type_targets_nothing() {
        let query = NotificationsQuery {
            notification_type: Some("sms".to_string()),
            element_id: Some("s1".to_string()),
            ..Default::default()
        };
        assert_eq!(AutoDisable::from_query(&query).notification_type, None);
    }
}
