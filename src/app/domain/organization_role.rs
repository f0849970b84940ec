use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A user's role within one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrganizationRole {
    Owner,
    Manager,
    Member,
    Billing,
}

impl OrganizationRole {
    /// Owners and managers see every project in the organization; everyone else
    /// only sees projects reachable through their teams.
    pub fn sees_all_projects(self) -> bool {
        matches!(self, OrganizationRole::Owner | OrganizationRole::Manager)
    }
}
