//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use pantry_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (`PANTRY_HOST`)
    pub host: IpAddr,

    /// Bind port (`PORT`)
    pub port: u16,

    /// SQLite file, created on first run (`PANTRY_DB_PATH`)
    pub database_path: PathBuf,

    /// Pool size (`PANTRY_DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// How long a statement waits on a locked database (`PANTRY_DB_BUSY_TIMEOUT_SECS`)
    pub db_busy_timeout: Duration,

    /// Request body limit in bytes (`PANTRY_MAX_BODY_BYTES`)
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            database_path: PathBuf::from("database.db"),
            db_max_connections: 5,
            db_busy_timeout: Duration::from_secs(5),
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: parse_or(&lookup, "PANTRY_HOST", defaults.host)?,

            port: parse_or(&lookup, "PORT", defaults.port)?,

            database_path: lookup("PANTRY_DB_PATH")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "PANTRY_DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            db_busy_timeout: Duration::from_secs(parse_or(
                &lookup,
                "PANTRY_DB_BUSY_TIMEOUT_SECS",
                defaults.db_busy_timeout.as_secs(),
            )?),

            max_body_bytes: parse_or(&lookup, "PANTRY_MAX_BODY_BYTES", defaults.max_body_bytes)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PANTRY_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the listener binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Pool settings for [`pantry_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.db_max_connections)
            .busy_timeout(self.db_busy_timeout)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
