//! Database connection settings read from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

/// PostgreSQL listens on its standard port; it is not configurable.
pub const DB_PORT: u16 = 5432;

pub const DEFAULT_DB_HOST: &str = "db";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_NAME: &str = "todos";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub max_connections: u32,
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_MAX_CONNECTIONS`, falling back to the documented defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections =
            parse_var(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Zero {
                name: "DB_MAX_CONNECTIONS",
            });
        }

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
            database: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            port: DB_PORT,
            max_connections,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            database: DEFAULT_DB_NAME.to_string(),
            port: DB_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Parse an optional variable, using `default` when it is unset or blank.
pub fn parse_var<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name, value })
        }
        _ => Ok(default),
    }
}
