//! # Connection Pool
//!
//! Opens the SQLite file and hands out repositories that share one pool.
//!
//! ## File vs. In-Memory
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("database.db")          DbConfig::in_memory()           │
//! │  ─────────────────────────────         ─────────────────────────        │
//! │  file created if missing               "sqlite::memory:"               │
//! │  up to max_connections (5)             exactly 1 connection            │
//! │  idle connections recycled             connection never recycled       │
//! │                                        (closing it drops the data)     │
//! │               │                                   │                     │
//! │               └──────────────┬────────────────────┘                     │
//! │                              ▼                                          │
//! │     per connection: journal_mode=WAL, synchronous=NORMAL,               │
//! │                     foreign_keys=OFF, busy_timeout                      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │     Database::new ─► schema migration ─► demo users                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository call borrows a connection (or opens a transaction) and
//! gives it back when the call returns, including on error.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{ProductRepository, ShoppingListRepository, StoreRepository, UserRepository};
use crate::seed;

const IN_MEMORY: &str = ":memory:";

/// Connections of a file-backed pool are replaced after this long.
const FILE_MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

// =============================================================================
// Configuration
// =============================================================================

/// Pool and connection settings.
///
/// ```rust,ignore
/// let config = DbConfig::new("database.db")
///     .max_connections(5)
///     .busy_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool ceiling. Default 5.
    pub max_connections: u32,

    /// Connections opened eagerly. Default 1.
    pub min_connections: u32,

    /// Wait for a free pooled connection. Default 30s.
    pub connect_timeout: Duration,

    /// Wait on a locked database before a statement fails. Default 5s.
    pub busy_timeout: Duration,

    /// `None` keeps idle connections open. Default 10 minutes.
    pub idle_timeout: Option<Duration>,

    /// Apply the schema and demo users on open. Default true.
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed configuration with defaults.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    /// Private database for tests.
    ///
    /// Each SQLite in-memory connection is a separate database, so the pool
    /// is pinned to one connection that is never closed while the pool lives.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            ..DbConfig::new(IN_MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let base = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
        };

        Ok(base
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Dangling references are allowed and deletes never cascade
            .foreign_keys(false)
            .busy_timeout(self.busy_timeout))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let max_lifetime = if self.is_in_memory() {
            None
        } else {
            Some(FILE_MAX_LIFETIME)
        };

        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(max_lifetime)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared database handle. Clones share the same pool.
///
/// ```rust,ignore
/// async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductListing>>, ApiError> {
///     Ok(Json(state.db.products().list().await?))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, prepares the schema.
    ///
    /// A fresh file comes out of this with all five tables and the two demo
    /// accounts.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let options = config.connect_options()?;
        debug!(
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            "SQLite connect options ready"
        );

        let pool = config
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations, then inserts missing demo users.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        let seeded = seed::ensure_demo_users(&self.pool).await?;
        info!(seeded, "Schema ready");
        Ok(())
    }

    /// `(known, applied)` migration counts.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn stores(&self) -> StoreRepository {
        StoreRepository::new(self.pool.clone())
    }

    pub fn shopping_lists(&self) -> ShoppingListRepository {
        ShoppingListRepository::new(self.pool.clone())
    }

    /// Waits for borrowed connections to come back, then closes them all.
    /// Every later call on any clone fails.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }

    /// True if `SELECT 1` succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
