//! Database connection configuration.
//!
//! The crate treats the connection string as opaque: it is read from an
//! environment variable (or supplied directly), checked for presence, and
//! handed to the pool as-is.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the application's connection string.
pub const DB_CONN_STRING_VAR: &str = "DB_CONN_STRING";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while assembling a [`DatabaseConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The variable is not set (or is not valid Unicode).
    #[error("environment variable {0} must be set")]
    Missing(String),

    /// The connection string is empty after trimming.
    #[error("connection string from {0} is empty")]
    Empty(String),
}

/// Validated settings for building a connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    connection_string: String,
    max_connections: u32,
    connection_timeout: Duration,
    statement_timeout: Option<Duration>,
}

impl DatabaseConfig {
    /// Creates a configuration from an explicit connection string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Empty`] when the string is blank.
    pub fn new(connection_string: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::from_source("connection string", connection_string.into())
    }

    /// Reads the connection string from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Missing`] when the variable is unset and
    /// [`ConfigurationError::Empty`] when it is blank.
    pub fn from_env(var: &str) -> Result<Self, ConfigurationError> {
        let value = env::var(var).map_err(|_| ConfigurationError::Missing(var.to_owned()))?;
        Self::from_source(var, value)
    }

    fn from_source(source: &str, value: String) -> Result<Self, ConfigurationError> {
        if value.trim().is_empty() {
            return Err(ConfigurationError::Empty(source.to_owned()));
        }
        Ok(Self {
            connection_string: value,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            statement_timeout: None,
        })
    }

    /// Sets the upper bound on pooled connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets how long a caller waits for a pooled connection.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Sets a server-side limit applied to every statement.
    #[must_use]
    pub const fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    /// Returns the connection string.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Returns the upper bound on pooled connections.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Returns the per-statement timeout, if any.
    #[must_use]
    pub const fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout
    }
}
