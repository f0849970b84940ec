use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Deployment context of an environment. Only production surveys send notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnvironmentType {
    Production,
    Development,
}
