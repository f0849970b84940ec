mod demo_workspace;

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Name of the table tracking applied seeds.
pub const SEEDS_TABLE: &str = "_surveyhub_seeds";

/// Outcome of running a seed. Skipped seeds are not recorded so they may run again later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seed executed and made changes; record in the seeds table.
    Applied,
    /// Seed chose not to run (e.g. env not set); do not record.
    Skipped,
}

/// A database seed. Seeds run in version order and are tracked for idempotency.
#[async_trait]
pub trait Seed: Send + Sync {
    /// Unique version identifier (timestamp format: YYYYMMDDHHMMSS).
    fn version(&self) -> i64;

    /// Human-readable description of the seed.
    fn description(&self) -> &str;

    /// Execute the seed. Uses the db layer; no raw SQL.
    /// Return Skipped when the seed opts out (e.g. missing env); it will not be recorded.
    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error>;
}

/// All seeds in execution order (sorted by version).
pub fn all_seeds() -> Vec<Box<dyn Seed>> {
    let mut seeds: Vec<Box<dyn Seed>> = vec![Box::new(demo_workspace::DemoWorkspace)];
    seeds.sort_by_key(|s| s.version());
    seeds
}

pub async fn ensure_seeds_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {SEEDS_TABLE} (
            version INTEGER PRIMARY KEY NOT NULL,
            description TEXT NOT NULL,
            installed_on INTEGER NOT NULL DEFAULT (unixepoch()),
            success INTEGER NOT NULL DEFAULT 1
        )
        "#
    ))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT version FROM {SEEDS_TABLE}"))
        .fetch_all(pool)
        .await
}

pub async fn record_seed(pool: &SqlitePool, version: i64, description: &str) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("INSERT INTO {SEEDS_TABLE} (version, description) VALUES (?, ?)"))
        .bind(version)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn forget_seed(pool: &SqlitePool, version: i64) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DELETE FROM {SEEDS_TABLE} WHERE version = ?"))
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}
