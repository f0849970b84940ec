//! A user's notification preferences as stored on the user record.
//!
//! Two shapes exist in storage. The current one keeps `alert`, `weeklySummary`
//! and `unsubscribedOrganizationIds`. The legacy one keys survey ids at the top
//! level, each holding `{ "responseFinished": bool }`. Both are read into
//! [`NotificationSettings`]; unknown top-level keys land in `legacy` and are
//! written back untouched.
//!
//! Reading is lenient per entry. A flag that is not a boolean counts by
//! truthiness (`null`, `0` and `""` are off), a section of the wrong type reads
//! as empty, and only a document that is not a JSON object fails to parse.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// Which kind of notification a toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum NotificationType {
    /// Per-survey email on every finished response.
    #[serde(rename = "alert")]
    #[strum(serialize = "alert")]
    Alert,
    /// Per-project weekly digest.
    #[serde(rename = "weeklySummary")]
    #[strum(serialize = "weeklySummary")]
    WeeklySummary,
    /// Per-organization auto-subscription to new surveys.
    #[serde(rename = "unsubscribedOrganizationIds")]
    #[strum(serialize = "unsubscribedOrganizationIds")]
    UnsubscribedOrganizationIds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Survey id -> new-response email enabled.
    #[serde(default, deserialize_with = "lenient_flags")]
    pub alert: BTreeMap<String, bool>,

    /// Project id -> weekly summary enabled.
    #[serde(default, deserialize_with = "lenient_flags")]
    pub weekly_summary: BTreeMap<String, bool>,

    #[serde(default, deserialize_with = "lenient_ids")]
    pub unsubscribed_organization_ids: Vec<String>,

    /// Any other top-level key. Holds the legacy per-survey entries.
    #[serde(flatten)]
    pub legacy: BTreeMap<String, Value>,
}

/// JSON truthiness: `null`, `false`, `0` and `""` are off, anything else is on.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lenient_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(id, flag)| {
                let enabled = is_truthy(&flag);
                (id, enabled)
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

impl NotificationSettings {
    /// Parse the stored column. `None` (never saved) yields empty settings.
    pub fn from_stored(stored: Option<&str>) -> Result<Self, serde_json::Error> {
        match stored {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Legacy `responseFinished` for this survey, read by truthiness so `1`
    /// and `"true"` count as set.
    pub fn legacy_response_finished(&self, survey_id: &str) -> bool {
        self.legacy
            .get(survey_id)
            .and_then(|entry| entry.get("responseFinished"))
            .is_some_and(is_truthy)
    }

    /// Whether new surveys in this organization subscribe the user automatically.
    pub fn is_subscribed_to_organization(&self, organization_id: &str) -> bool {
        !self
            .unsubscribed_organization_ids
            .iter()
            .any(|id| id == organization_id)
    }

    /// Set one toggle. For organizations, `enabled` means subscribed.
    pub fn set(&mut self, kind: NotificationType, element_id: &str, enabled: bool) {
        match kind {
            NotificationType::Alert => {
                self.legacy.remove(element_id);
                self.alert.insert(element_id.to_string(), enabled);
            }
            NotificationType::WeeklySummary => {
                self.weekly_summary.insert(element_id.to_string(), enabled);
            }
            NotificationType::UnsubscribedOrganizationIds => {
                self.unsubscribed_organization_ids.retain(|id| id != element_id);
                if !enabled {
                    self.unsubscribed_organization_ids.push(element_id.to_string());
                }
            }
        }
    }

    /// Fold a completed view back into stored settings. Entries the completed
    /// view does not mention are kept; legacy entries for surveys it covers are
    /// dropped since `alert` now holds their value.
    pub fn absorb(&mut self, completed: &NotificationSettings) {
        for (survey_id, enabled) in &completed.alert {
            self.legacy.remove(survey_id);
            self.alert.insert(survey_id.clone(), *enabled);
        }
        for (project_id, enabled) in &completed.weekly_summary {
            self.weekly_summary.insert(project_id.clone(), *enabled);
        }
        self.unsubscribed_organization_ids = completed.unsubscribed_organization_ids.clone();
    }
}
