use strum_macros::{Display, EnumString};

/// What the notifications page shows when no memberships could be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EmptyMembershipPolicy {
    /// Show stored settings as-is, legacy shape included. Nothing is discarded
    /// when the membership lookup is off or failed.
    Keep,
    /// Run the merge anyway; only `unsubscribedOrganizationIds` survives.
    Normalize,
}

/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL. Required.
    pub database_url: String,

    /// Address the HTTP server binds to.
    /// Default: 0.0.0.0:3000
    pub bind_addr: String,

    /// Whether to query organizations/projects/surveys for the notifications page.
    /// Default: true
    pub membership_lookup_enabled: bool,

    /// Default: keep
    pub empty_membership_policy: EmptyMembershipPolicy,
}

fn parse_flag(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("{} must be true or false", name)),
    }
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if required vars are missing.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let membership_lookup_enabled = match std::env::var("MEMBERSHIP_LOOKUP_ENABLED") {
            Ok(v) => parse_flag("MEMBERSHIP_LOOKUP_ENABLED", &v)?,
            Err(_) => true,
        };

        let empty_membership_policy = std::env::var("NOTIFICATIONS_EMPTY_MEMBERSHIPS")
            .unwrap_or_else(|_| "keep".to_string())
            .parse::<EmptyMembershipPolicy>()
            .map_err(|_| "NOTIFICATIONS_EMPTY_MEMBERSHIPS must be keep or normalize")?;

        Ok(Self {
            database_url,
            bind_addr,
            membership_lookup_enabled,
            empty_membership_policy,
        })
    }

    /// Config for tests. Uses in-memory database URL and the default policies.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            membership_lookup_enabled: true,
            empty_membership_policy: EmptyMembershipPolicy::Keep,
        }
    }
}
