//! # Schema Migrations
//!
//! The SQL files under the workspace `migrations/sqlite` directory are
//! compiled into the binary and applied in filename order. sqlx records each
//! applied file in `_sqlx_migrations`, so reopening a database applies only
//! what is new.
//!
//! `001_initial_schema.sql` uses `CREATE TABLE IF NOT EXISTS` throughout, so
//! a database file whose tables predate the migration table is adopted
//! without changes.
//!
//! New schema changes go in a new `NNN_description.sql` file; applied files
//! are checksummed and must not be edited.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration not yet recorded.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(known = MIGRATOR.migrations.len(), "Applying schema migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// `(known, applied)`: migrations embedded in the binary vs. recorded in
/// the database.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((MIGRATOR.migrations.len(), applied as usize))
}
