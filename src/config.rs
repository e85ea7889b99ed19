//! Storage configuration and connection pool construction.
//!
//! # Example
//!
//! ```
//! use taskboard::config::StoreConfig;
//!
//! let config = StoreConfig::new("postgres://localhost/taskboard").with_pool_size(4);
//! assert_eq!(config.pool_size, 4);
//! ```

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the Diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "TASKBOARD_DATABASE_URL";

/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_POOL_SIZE";

/// Environment variable holding the connection checkout timeout in seconds.
pub const CONNECTION_TIMEOUT_VAR: &str = "TASKBOARD_CONNECTION_TIMEOUT_SECS";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Parse failure description.
        reason: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Connection settings for the `PostgreSQL` adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a caller waits to check out a connection.
    pub connection_timeout: Duration,
}

impl StoreConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the connection checkout timeout.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when the database URL is unset and
    /// [`ConfigError::InvalidVar`] when a numeric setting cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::from_env`].
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingVar(DATABASE_URL_VAR))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(POOL_SIZE_VAR) {
            config.pool_size = parse_var::<u32>(POOL_SIZE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(CONNECTION_TIMEOUT_VAR) {
            config.connection_timeout =
                Duration::from_secs(parse_var::<u64>(CONNECTION_TIMEOUT_VAR, &raw)?);
        }
        Ok(config)
    }

    /// Builds the Diesel r2d2 pool described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot establish its
    /// initial connections.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?;
        tracing::debug!(pool_size = self.pool_size, "built PostgreSQL connection pool");
        Ok(pool)
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|err| ConfigError::InvalidVar {
        name,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
