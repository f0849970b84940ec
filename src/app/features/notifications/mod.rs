//! Account notification settings: email alerts per survey, weekly summaries
//! per project, and auto-subscription per organization.

pub mod api;
pub mod complete;
pub mod deep_link;
pub mod load;
pub mod membership;
pub mod page;
pub mod types;
pub mod update;

use axum::Router;

use crate::app::AppState;

pub use complete::{complete_notification_settings, resolve_notification_settings};
pub use membership::{fetch_tree, MembershipError, MembershipSource, SqliteMembershipSource};
pub use types::Membership;

/// Notification settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page::routes())
        .merge(update::routes())
        .merge(api::routes())
}
