use sqlx::{FromRow, SqliteExecutor};
use time::OffsetDateTime;

use crate::app::domain::UserId;

/// Database row for users table.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Raw JSON. NULL until the user first saves a preference.
    pub notification_settings: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data structure for inserting a new user.
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub notification_settings: Option<String>,
}

/// Find a user by ID.
pub async fn find_by_id<'e, E>(executor: E, user_id: &UserId) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        "SELECT id, email, notification_settings, created_at, updated_at FROM users WHERE id = ?",
    )
    .bind(user_id.as_str())
    .fetch_optional(executor)
    .await
}

/// Insert a new user into the database.
pub async fn insert<'e, E>(executor: E, user: &NewUser) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query(
        "INSERT INTO users (id, email, notification_settings, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user.id.as_str())
    .bind(&user.email)
    .bind(&user.notification_settings)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Bump `updated_at`. Run first inside a transaction to take SQLite's write
/// lock before reading the row back.
pub async fn touch<'e, E>(executor: E, user_id: &UserId) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let result = sqlx::query("UPDATE users SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(user_id.as_str())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Overwrite a user's stored notification settings JSON.
pub async fn update_notification_settings<'e, E>(
    executor: E,
    user_id: &UserId,
    settings_json: &str,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("UPDATE users SET notification_settings = ?, updated_at = ? WHERE id = ?")
        .bind(settings_json)
        .bind(now)
        .bind(user_id.as_str())
        .execute(executor)
        .await?;
    Ok(())
}
