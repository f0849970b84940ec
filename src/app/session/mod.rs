//! Session cookie lookup. Sessions are issued elsewhere; this app only reads them.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::app::{db, error::AppError, AppState};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Extractor for a valid, non-expired session. Rejects with 401 otherwise.
pub struct AuthenticatedSession(pub db::Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        let session = db::sessions::find_valid(&state.db, &session_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        Ok(Self(session))
    }
}
