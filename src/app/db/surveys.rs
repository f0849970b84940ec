use sqlx::SqliteExecutor;
use time::OffsetDateTime;

use crate::app::domain::{EnvironmentId, SurveyId};

/// Data structure for inserting a new survey.
pub struct NewSurvey {
    pub id: SurveyId,
    pub environment_id: EnvironmentId,
    pub name: String,
}

/// Insert a new survey into the database.
pub async fn insert<'e, E>(executor: E, survey: &NewSurvey) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO surveys (id, environment_id, name, created_at) VALUES (?, ?, ?, ?)")
        .bind(survey.id.as_str())
        .bind(survey.environment_id.as_str())
        .bind(&survey.name)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}
