use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

/// Human-readable application name, used in templates and UI.
/// Change this constant to rename the app across all pages.
pub const APP_NAME: &str = "Surveyhub";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: config::Config,
    /// `None` when membership lookups are disabled; pages then render without them.
    pub memberships: Option<Arc<dyn features::notifications::MembershipSource>>,
}

/// App routes. Merged in `create_router`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(features::notifications::routes())
}

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod session;
